//! Embed surface construction
//!
//! Builds the iframe-equivalent surface for a video from its configuration.
//! The URL layout is fixed for compatibility with the iframe player API:
//! native controls, branding and keyboard input are disabled and script
//! control is enabled; mute, autoplay, loop and end flags are appended
//! conditionally, in that order.

use std::fmt::Write;
use vbg_common::{BackgroundConfig, VideoId};

const EMBED_HOST: &str = "https://www.youtube.com/embed/";
const EMBED_HOST_NO_COOKIE: &str = "https://www.youtube-nocookie.com/embed/";

const FIXED_QUERY: &str = "?&enablejsapi=1&disablekb=1&controls=0&rel=0&iv_load_policy=3\
&cc_load_policy=0&playsinline=1&showinfo=0&modestbranding=1&fs=0";

/// Ordered inline style declarations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceStyle {
    properties: Vec<(String, String)>,
}

impl SurfaceStyle {
    /// Set a property, replacing any previous value in place
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.properties.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// `name: value; ...` form for a `style` attribute
    pub fn to_css(&self) -> String {
        self.properties
            .iter()
            .map(|(n, v)| format!("{}: {}", n, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The playback frame inserted into the host element
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedSurface {
    /// Element id; the backend binds its handle to this
    pub id: String,
    /// Embed URL
    pub src: String,
    /// Fixed frame attributes, in insertion order
    pub attributes: Vec<(&'static str, String)>,
    /// Inline styles
    pub style: SurfaceStyle,
}

impl EmbedSurface {
    /// Whether the surface has been made fully visible
    pub fn is_revealed(&self) -> bool {
        self.style.get("opacity").map_or(true, |o| o == "1")
    }

    /// Make the surface fully visible
    pub fn reveal(&mut self) {
        self.style.set("opacity", "1");
    }

    /// Render as an `<iframe>` element
    pub fn to_markup(&self) -> String {
        let mut out = String::from("<iframe");
        if !self.id.is_empty() {
            let _ = write!(out, " id=\"{}\"", escape_attr(&self.id));
        }
        let _ = write!(out, " src=\"{}\"", escape_attr(&self.src));
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        if !self.style.is_empty() {
            let _ = write!(out, " style=\"{}\"", escape_attr(&self.style.to_css()));
        }
        out.push_str("></iframe>");
        out
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Compose the embed URL for `video_id`
pub fn build_embed_url(config: &BackgroundConfig, video_id: &VideoId) -> String {
    let site = if config.no_cookie {
        EMBED_HOST_NO_COOKIE
    } else {
        EMBED_HOST
    };

    let mut src = format!("{}{}{}", site, video_id, FIXED_QUERY);

    if config.muted {
        src.push_str("&mute=1");
    }
    // Autoplay in the URL only when visibility must not gate it
    if config.autoplay_always() {
        src.push_str("&autoplay=1");
    }
    if config.loop_playback {
        src.push_str("&loop=1");
    }
    if let Some(end) = config.end_bound() {
        let _ = write!(src, "&end={}", end);
    }

    src
}

/// Build the surface for `video_id` with element id `surface_id`
///
/// Inline-styled surfaces start transparent and are revealed once the
/// player signals readiness. Fitted surfaces fill their host; all others
/// are left for the cover-resize collaborator.
pub fn build_embed(config: &BackgroundConfig, video_id: &VideoId, surface_id: &str) -> EmbedSurface {
    let mut style = SurfaceStyle::default();

    if config.inline_styles {
        style.set("top", "50%");
        style.set("left", "50%");
        style.set("transform", "translateX(-50%) translateY(-50%)");
        style.set("position", "absolute");
        style.set("opacity", "0");
    }

    if config.fit_box {
        style.set("width", "100%");
        style.set("height", "100%");
    }

    EmbedSurface {
        id: surface_id.to_string(),
        src: build_embed_url(config, video_id),
        attributes: vec![
            ("frameborder", "0".to_string()),
            ("allow", "autoplay; mute".to_string()),
        ],
        style,
    }
}
