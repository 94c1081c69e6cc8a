//! # Video Background Common Library
//!
//! Shared code for the video background crates:
//! - Error type
//! - Background configuration and TOML loading
//! - Notification and playback event types (Notification, NotificationBus)
//! - Video identifier parsing

pub mod config;
pub mod error;
pub mod events;
pub mod video_id;

pub use config::BackgroundConfig;
pub use error::{Error, Result};
pub use video_id::VideoId;
