//! Notification types for the video background event system
//!
//! Provides the outward notifications a background emits on its host element
//! and a NotificationBus for hosts that fan them out to several listeners.

mod playback_types;

pub use playback_types::{BindingPhase, PlaybackState, PlayerStatus};

use crate::VideoId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Outward notification kinds
///
/// Each maps to a fixed DOM event name (see [`BackgroundEvent::name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundEvent {
    Play,
    Pause,
    Mute,
    Unmute,
    VolumeChange,
}

impl BackgroundEvent {
    /// Event name dispatched on the host element
    pub fn name(self) -> &'static str {
        match self {
            BackgroundEvent::Play => "video-background-play",
            BackgroundEvent::Pause => "video-background-pause",
            BackgroundEvent::Mute => "video-background-mute",
            BackgroundEvent::Unmute => "video-background-unmute",
            BackgroundEvent::VolumeChange => "video-background-volume-change",
        }
    }
}

impl std::fmt::Display for BackgroundEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Instance state carried as the `detail` of every notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSnapshot {
    /// Host-assigned instance uid (also the surface id)
    pub uid: String,
    /// Video being played
    pub video_id: VideoId,
    /// Binding lifecycle phase
    pub phase: BindingPhase,
    /// Local playing flag
    pub playing: bool,
    /// Local muted flag
    pub muted: bool,
    /// Whether the configured volume has been applied
    pub volume_applied_once: bool,
    /// Whether the host currently intersects the viewport
    pub intersecting: bool,
}

impl BackgroundSnapshot {
    pub fn playback_state(&self) -> PlaybackState {
        if self.playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }
}

/// A bubbling, detail-carrying notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Which transition happened
    pub kind: BackgroundEvent,
    /// Propagates to ancestors of the host element
    pub bubbles: bool,
    /// Instance state at the time of emission
    pub detail: BackgroundSnapshot,
    /// When the notification was emitted
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Notification {
    /// Create a bubbling notification stamped with the current time
    pub fn new(kind: BackgroundEvent, detail: BackgroundSnapshot) -> Self {
        Self {
            kind,
            bubbles: true,
            detail,
            timestamp: chrono::Utc::now(),
        }
    }

    /// DOM event name of this notification
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// JSON form, as handed to script-side listeners
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ========================================
// NotificationBus Implementation
// ========================================

/// Fan-out of notifications to any number of listeners
///
/// Uses tokio::broadcast internally:
/// - Non-blocking publish (slow listeners don't block the emitting handler)
/// - Multiple concurrent listeners
/// - Automatic cleanup when listeners drop
///
/// Listeners only see notifications published after they subscribed.
#[derive(Debug)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
    capacity: usize,
}

impl NotificationBus {
    /// Creates a new bus buffering up to `capacity` notifications per listener
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future notifications
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Publish a notification
    ///
    /// Returns `Ok(listener_count)` if at least one listener exists.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        notification: Notification,
    ) -> Result<usize, broadcast::error::SendError<Notification>> {
        self.tx.send(notification)
    }

    /// Publish a notification, ignoring the case of no listeners
    pub fn emit_lossy(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }

    /// Current number of listeners
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(100)
    }
}
