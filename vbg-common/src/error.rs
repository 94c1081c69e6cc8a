//! Common error types for the video background crates

use thiserror::Error;

/// Common result type for video background setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up a background.
///
/// Playback commands never return these: once a component exists, every
/// command degrades to a no-op instead of failing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error (wraps toml::de::Error)
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration value out of range or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input, e.g. an unrecognizable video identifier
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
