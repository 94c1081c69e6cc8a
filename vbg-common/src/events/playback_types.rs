//! Playback-related type definitions
//!
//! Supporting types for local playback state and the backend player lifecycle.

use serde::{Deserialize, Serialize};

/// Local playback state as perceived by the host page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
        }
    }
}

/// Lifecycle of the external player binding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum BindingPhase {
    /// No player handle yet
    Unbound,
    /// Handle attached, readiness not yet signaled
    BoundIdle,
    /// Readiness signal received; commands take effect
    Ready,
}

impl std::fmt::Display for BindingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingPhase::Unbound => write!(f, "Unbound"),
            BindingPhase::BoundIdle => write!(f, "BoundIdle"),
            BindingPhase::Ready => write!(f, "Ready"),
        }
    }
}

/// Player status reported by the backend's state-change callback
///
/// Codes follow the iframe player API. Unknown codes are kept verbatim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "i32", from = "i32")]
pub enum PlayerStatus {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Other(i32),
}

impl PlayerStatus {
    /// Backend code for this status
    pub fn code(self) -> i32 {
        match self {
            PlayerStatus::Unstarted => -1,
            PlayerStatus::Ended => 0,
            PlayerStatus::Playing => 1,
            PlayerStatus::Paused => 2,
            PlayerStatus::Buffering => 3,
            PlayerStatus::Cued => 5,
            PlayerStatus::Other(code) => code,
        }
    }

    /// Map a backend code to a status
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => PlayerStatus::Unstarted,
            0 => PlayerStatus::Ended,
            1 => PlayerStatus::Playing,
            2 => PlayerStatus::Paused,
            3 => PlayerStatus::Buffering,
            5 => PlayerStatus::Cued,
            other => PlayerStatus::Other(other),
        }
    }
}

impl From<i32> for PlayerStatus {
    fn from(code: i32) -> Self {
        PlayerStatus::from_code(code)
    }
}

impl From<PlayerStatus> for i32 {
    fn from(status: PlayerStatus) -> Self {
        status.code()
    }
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerStatus::Unstarted => write!(f, "unstarted"),
            PlayerStatus::Ended => write!(f, "ended"),
            PlayerStatus::Playing => write!(f, "playing"),
            PlayerStatus::Paused => write!(f, "paused"),
            PlayerStatus::Buffering => write!(f, "buffering"),
            PlayerStatus::Cued => write!(f, "cued"),
            PlayerStatus::Other(code) => write!(f, "status {}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(PlayerStatus::from_code(-1), PlayerStatus::Unstarted);
        assert_eq!(PlayerStatus::from_code(0), PlayerStatus::Ended);
        assert_eq!(PlayerStatus::from_code(5), PlayerStatus::Cued);
        assert_eq!(PlayerStatus::Cued.code(), 5);
    }

    #[test]
    fn test_unknown_code_passes_through() {
        let status = PlayerStatus::from_code(42);
        assert_eq!(status, PlayerStatus::Other(42));
        assert_eq!(status.code(), 42);
        assert_eq!(serde_json::to_string(&status).unwrap(), "42");
    }
}
