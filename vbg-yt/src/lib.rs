//! # YouTube Video Background (vbg-yt)
//!
//! Runs a YouTube iframe player as a background behind page content.
//!
//! **Purpose:** Inject the player surface, keep its playback in sync with
//! the host's visibility and with play/pause/mute commands, enforce
//! loop/autoplay/start-offset behavior, and notify the host of every
//! transition.
//!
//! **Architecture:** Backend loader → embed builder → player binding →
//! playback state machine → notification emitter. The browser, the player
//! API and the geometry helper are reached only through the traits in
//! [`backend`] and [`host`].

pub mod backend;
pub mod background;
pub mod binding;
pub mod embed;
pub mod headless;
pub mod host;
pub mod notify;

pub use background::{BackgroundEnv, LocalState, StatusCallback, VideoBackground};
pub use embed::{build_embed, build_embed_url, EmbedSurface};
pub use vbg_common::{BackgroundConfig, Error, Result, VideoId};
