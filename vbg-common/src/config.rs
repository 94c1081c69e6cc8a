//! Configuration for a video background instance
//!
//! Two layers, loaded from a single TOML file:
//! 1. **`[background]`**: the per-instance options recognized by the player
//! 2. **`[logging]`**: log level for the command-line tool
//!
//! Keys use the same kebab-case names as the declarative markup attributes
//! (`start-at`, `always-play`, `no-cookie`, ...). Missing keys fall back to
//! built-in defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Aspect ratio used when `resolution` is missing or malformed
const DEFAULT_RESOLUTION_MOD: f64 = 16.0 / 9.0;

/// Per-instance background options
///
/// Read-only once a component is constructed. Runtime changes go through the
/// component's command methods, never through this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BackgroundConfig {
    /// Playback start offset in seconds
    pub start_at: u32,

    /// Playback end bound in seconds (0 = play to the end)
    pub end_at: u32,

    /// Start playing as soon as the player is ready
    pub autoplay: bool,

    /// Keep playing regardless of viewport visibility
    pub always_play: bool,

    /// Restart from `start_at` when the video ends
    #[serde(rename = "loop")]
    pub loop_playback: bool,

    /// Start muted
    pub muted: bool,

    /// Volume applied on first unmute, as a fraction (0.0-1.0)
    pub volume: f64,

    /// Use the privacy-enhanced embed host
    pub no_cookie: bool,

    /// Size the surface to 100% of its host instead of cover-resizing
    pub fit_box: bool,

    /// Apply absolute centering styles to the surface
    pub inline_styles: bool,

    /// Aspect ratio of the video as `"W:H"`
    pub resolution: String,

    /// Extra pixels added around the cover-resized surface
    pub offset: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            start_at: 0,
            end_at: 0,
            autoplay: true,
            always_play: false,
            loop_playback: true,
            muted: true,
            volume: 1.0,
            no_cookie: true,
            fit_box: false,
            inline_styles: true,
            resolution: "16:9".to_string(),
            offset: 200.0,
        }
    }
}

impl BackgroundConfig {
    /// Parse a standalone `BackgroundConfig` table and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BackgroundConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.volume) || self.volume.is_nan() {
            return Err(Error::Config(format!(
                "volume must be between 0.0 and 1.0, got {}",
                self.volume
            )));
        }
        if !self.offset.is_finite() {
            return Err(Error::Config(format!("offset must be finite, got {}", self.offset)));
        }
        parse_resolution(&self.resolution)?;
        Ok(())
    }

    /// Width / height ratio derived from `resolution`
    pub fn resolution_mod(&self) -> f64 {
        parse_resolution(&self.resolution).unwrap_or(DEFAULT_RESOLUTION_MOD)
    }

    /// End bound, if one is configured
    pub fn end_bound(&self) -> Option<u32> {
        (self.end_at > 0).then_some(self.end_at)
    }

    /// Whether autoplay should happen regardless of visibility
    pub fn autoplay_always(&self) -> bool {
        self.autoplay && self.always_play
    }
}

/// Parse `"W:H"` into a width / height ratio
fn parse_resolution(value: &str) -> Result<f64> {
    let malformed = || Error::Config(format!("resolution must look like \"16:9\", got {value:?}"));

    let (w, h) = value.split_once(':').ok_or_else(malformed)?;
    let w: f64 = w.trim().parse().map_err(|_| malformed())?;
    let h: f64 = h.trim().parse().map_err(|_| malformed())?;
    if w <= 0.0 || h <= 0.0 || !w.is_finite() || !h.is_finite() {
        return Err(malformed());
    }
    Ok(w / h)
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration file for the command-line tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Background options (optional, defaults apply)
    #[serde(default)]
    pub background: BackgroundConfig,
}

impl ToolConfig {
    /// Parse and validate a tool configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ToolConfig = toml::from_str(content)?;
        config.background.validate()?;
        Ok(config)
    }

    /// Load and validate a tool configuration file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackgroundConfig::default();
        assert!(config.autoplay);
        assert!(config.loop_playback);
        assert!(config.muted);
        assert!(config.no_cookie);
        assert!(!config.always_play);
        assert_eq!(config.end_bound(), None);
        assert!((config.resolution_mod() - 16.0 / 9.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_kebab_case_keys() {
        let config = BackgroundConfig::from_toml_str(
            r#"
            start-at = 5
            end-at = 30
            always-play = true
            loop = false
            no-cookie = false
            fit-box = true
            inline-styles = false
            volume = 0.4
            resolution = "4:3"
            "#,
        )
        .unwrap();

        assert_eq!(config.start_at, 5);
        assert_eq!(config.end_bound(), Some(30));
        assert!(config.always_play);
        assert!(!config.loop_playback);
        assert!(!config.no_cookie);
        assert!(config.fit_box);
        assert!(!config.inline_styles);
        assert_eq!(config.volume, 0.4);
        assert!((config.resolution_mod() - 4.0 / 3.0).abs() < 1e-9);
        // Unspecified keys keep their defaults
        assert!(config.autoplay);
        assert_eq!(config.offset, 200.0);
    }

    #[test]
    fn test_volume_out_of_range_rejected() {
        let err = BackgroundConfig::from_toml_str("volume = 1.5").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_resolution_rejected() {
        for bad in ["16x9", "16:0", "a:b", ""] {
            let config = BackgroundConfig {
                resolution: bad.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
            assert!((config.resolution_mod() - DEFAULT_RESOLUTION_MOD).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_type_is_toml_error() {
        let err = BackgroundConfig::from_toml_str("autoplay = \"yes\"").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_autoplay_always() {
        let mut config = BackgroundConfig::default();
        assert!(!config.autoplay_always());
        config.always_play = true;
        assert!(config.autoplay_always());
        config.autoplay = false;
        assert!(!config.autoplay_always());
    }
}
