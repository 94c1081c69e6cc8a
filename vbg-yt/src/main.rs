//! vbg-yt - render the embed surface of a YouTube background
//!
//! Builds the background against an in-memory host and prints either the
//! embed URL or the complete `<iframe>` markup.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vbg_common::config::ToolConfig;
use vbg_yt::headless::{HeadlessDocument, HeadlessHost, OfflineRegistry};
use vbg_yt::{BackgroundEnv, VideoBackground, VideoId};

/// Command-line arguments for vbg-yt
#[derive(Parser, Debug)]
#[command(name = "vbg-yt")]
#[command(about = "Render a YouTube background video embed")]
#[command(version)]
struct Args {
    /// Video id or YouTube URL
    video: String,

    /// TOML configuration file with [logging] and [background] tables
    #[arg(short, long, env = "VBG_CONFIG")]
    config: Option<PathBuf>,

    /// Print the full <iframe> element instead of the URL
    #[arg(long)]
    markup: bool,

    /// Start offset in seconds
    #[arg(long)]
    start_at: Option<u32>,

    /// End bound in seconds (0 = none)
    #[arg(long)]
    end_at: Option<u32>,

    /// Start with sound
    #[arg(long)]
    unmuted: bool,

    /// Play once instead of looping
    #[arg(long)]
    no_loop: bool,

    /// Do not start playback automatically
    #[arg(long)]
    no_autoplay: bool,

    /// Keep playing while out of view
    #[arg(long)]
    always_play: bool,

    /// Use www.youtube.com instead of the privacy-enhanced host
    #[arg(long)]
    cookie: bool,

    /// Fill the host element instead of cover-resizing
    #[arg(long)]
    fit_box: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ToolConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ToolConfig::default(),
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vbg_yt={}", config.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    apply_overrides(&mut config, &args);
    config
        .background
        .validate()
        .context("Invalid background configuration")?;
    debug!("Background configuration: {:?}", config.background);

    let video_id = VideoId::parse(&args.video).context("Unrecognized video")?;
    info!("Rendering background for video {}", video_id);

    let host = Rc::new(HeadlessHost::new());
    let env = BackgroundEnv {
        host: host.clone(),
        document: Rc::new(HeadlessDocument::new()),
        registry: Rc::new(OfflineRegistry),
        resizer: None,
    };
    let background = VideoBackground::new(config.background, video_id.as_str(), env);

    let surface = background
        .surface()
        .context("No surface was built for the video")?;

    if args.markup {
        println!("{}", surface.to_markup());
    } else {
        println!("{}", surface.src);
    }

    Ok(())
}

/// Command-line flags win over the configuration file
fn apply_overrides(config: &mut ToolConfig, args: &Args) {
    let background = &mut config.background;

    if let Some(start_at) = args.start_at {
        background.start_at = start_at;
    }
    if let Some(end_at) = args.end_at {
        background.end_at = end_at;
    }
    if args.unmuted {
        background.muted = false;
    }
    if args.no_loop {
        background.loop_playback = false;
    }
    if args.no_autoplay {
        background.autoplay = false;
    }
    if args.always_play {
        background.always_play = true;
    }
    if args.cookie {
        background.no_cookie = false;
    }
    if args.fit_box {
        background.fit_box = true;
    }
}
