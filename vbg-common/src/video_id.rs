//! YouTube video identifier parsing
//!
//! Accepts either a bare identifier or any of the usual URL shapes:
//! `watch?v=`, `&v=`, `youtu.be/`, `embed/`, `shorts/`, `v/`, `vi/`, `u/x/`.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("static id pattern")
});

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtu\.be/|/v/|/vi/|/u/\w/|/embed/|/shorts/|[?&]vi?=)([^#&?/]*)")
        .expect("static url pattern")
});

/// A validated YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Parse a bare id or extract it from a YouTube URL
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidInput("empty video identifier".to_string()));
        }

        if ID_PATTERN.is_match(input) {
            return Ok(Self(input.to_string()));
        }

        URL_PATTERN
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|id| ID_PATTERN.is_match(id))
            .map(|id| Self(id.to_string()))
            .ok_or_else(|| Error::InvalidInput(format!("no video identifier in {input:?}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
