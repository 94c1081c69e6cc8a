//! Seams to the external YouTube player backend
//!
//! The backend is a script-delivered, process-wide registration. Everything
//! the component needs from it goes through these traits:
//! - [`BackendRegistry`]: "is the player API registered?" and handle creation
//! - [`ScriptDocument`]: presence check and insertion of the loader script
//! - [`PlayerHandle`]: per-surface playback controller
//!
//! Lifecycle callbacks from the backend are delivered as [`BackendSignal`]
//! messages over the channel handed to [`BackendRegistry::create_player`].

pub mod loader;

pub use loader::{ensure_backend_loaded, PLAYER_API_SRC};

use tokio::sync::mpsc;
use vbg_common::events::PlayerStatus;

/// Lifecycle signal delivered by the backend for one handle
///
/// The backend sends `Ready` once, before any `StateChange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendSignal {
    /// Handle is fully initialized and commandable
    Ready,
    /// Backend-driven playback state transition
    StateChange(PlayerStatus),
}

/// Sending half handed to the backend when a handle is created
pub type SignalSender = mpsc::UnboundedSender<BackendSignal>;

/// Per-surface playback controller exposed by the backend
pub trait PlayerHandle {
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);

    fn play_video(&mut self);

    fn pause_video(&mut self);

    fn mute(&mut self);

    fn un_mute(&mut self);

    /// Volume on the backend's 0-100 scale
    fn set_volume(&mut self, volume: u8);

    /// Current playback position in seconds
    fn current_time(&self) -> f64;
}

/// Process-wide backend registration
pub trait BackendRegistry {
    /// Whether the player API has finished loading and registered itself
    fn is_registered(&self) -> bool;

    /// Create a controller bound to the surface with id `surface_id`
    ///
    /// The backend keeps `signals` and reports readiness and state changes
    /// through it for the lifetime of the handle.
    fn create_player(&self, surface_id: &str, signals: SignalSender) -> Box<dyn PlayerHandle>;
}

/// Script-tag view of the document hosting the backend
pub trait ScriptDocument {
    /// Whether a script with exactly this `src` is present
    fn has_script(&self, src: &str) -> bool;

    /// Insert a script reference before the first script of the document
    fn insert_script_first(&self, src: &str);
}
