//! Playback state machine for a YouTube background
//!
//! Reconciles three event sources into one local playback state:
//! - backend lifecycle signals (readiness, state changes) via [`VideoBackground::handle_signal`]
//! - user-facing commands (`play`, `pause`, `mute`, ...)
//! - visibility changes via [`VideoBackground::set_intersecting`]
//!
//! # Phases
//!
//! ```text
//! Unbound ──attach──▶ BoundIdle ──Ready──▶ Ready (Playing ⇄ Paused)
//! ```
//!
//! Every playback command checks for a handle first; without one it is a
//! silent no-op. Commands are never queued for a later handle.

use crate::backend::{ensure_backend_loaded, BackendRegistry, BackendSignal, ScriptDocument};
use crate::binding::PlayerBinding;
use crate::embed::{build_embed, EmbedSurface};
use crate::host::{CoverResize, Host};
use crate::notify;
use std::rc::Rc;
use tracing::{debug, info, warn};
use vbg_common::events::{BackgroundEvent, BackgroundSnapshot, BindingPhase, PlayerStatus};
use vbg_common::{BackgroundConfig, VideoId};

/// Receives every backend state change verbatim
pub type StatusCallback = Box<dyn FnMut(PlayerStatus)>;

/// Local playback state as perceived by the host page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalState {
    pub playing: bool,
    pub muted: bool,
    pub volume_applied_once: bool,
    pub intersecting: bool,
}

/// External collaborators of one background instance
#[derive(Clone)]
pub struct BackgroundEnv {
    pub host: Rc<dyn Host>,
    pub document: Rc<dyn ScriptDocument>,
    pub registry: Rc<dyn BackendRegistry>,
    /// Geometry helper for non-fitted layouts
    pub resizer: Option<Rc<dyn CoverResize>>,
}

/// A YouTube player used as a background behind page content
pub struct VideoBackground {
    config: BackgroundConfig,
    video_id: Option<VideoId>,
    env: BackgroundEnv,
    surface: Option<EmbedSurface>,
    binding: PlayerBinding,
    phase: BindingPhase,
    state: LocalState,
    /// Autoplay was requested at readiness but the host was out of view
    autoplay_deferred: bool,
    on_status_change: Option<StatusCallback>,
}

impl VideoBackground {
    /// Build a background for `video` (a bare id or a YouTube URL)
    ///
    /// Requests the player API script, builds and appends the surface, and
    /// binds a handle right away if the backend is already registered. An
    /// unrecognizable `video` yields an inert instance: no surface, no
    /// binding, and every command a no-op.
    pub fn new(config: BackgroundConfig, video: &str, env: BackgroundEnv) -> Self {
        let video_id = match VideoId::parse(video) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Background {} left inert: {}", env.host.uid(), e);
                None
            }
        };

        let state = LocalState {
            playing: false,
            muted: config.muted,
            volume_applied_once: false,
            intersecting: env.host.is_intersecting(),
        };

        let mut background = Self {
            config,
            video_id,
            env,
            surface: None,
            binding: PlayerBinding::new(),
            phase: BindingPhase::Unbound,
            state,
            autoplay_deferred: false,
            on_status_change: None,
        };

        if let Some(video_id) = background.video_id.clone() {
            ensure_backend_loaded(&*background.env.registry, &*background.env.document);
            background.inject_surface(&video_id);
            background.attach_binding();
        }

        background
    }

    fn inject_surface(&mut self, video_id: &VideoId) {
        let surface = build_embed(&self.config, video_id, self.env.host.uid());
        info!("Embedding video {} as {}", video_id, surface.id);
        self.env.host.append_surface(&surface);
        self.surface = Some(surface);

        if !self.config.fit_box {
            self.resize();
        }
    }

    /// Register the status-change callback
    pub fn on_status_change(&mut self, callback: impl FnMut(PlayerStatus) + 'static) {
        self.on_status_change = Some(Box::new(callback));
    }

    /// Bind the player handle once the backend has registered
    ///
    /// Safe to call any number of times; only the first call made while the
    /// backend is registered has an effect.
    pub fn attach_binding(&mut self) -> bool {
        let Some(surface) = &self.surface else {
            return false;
        };

        let attached = self.binding.attach(&*self.env.registry, &surface.id);
        if attached {
            self.phase = BindingPhase::BoundIdle;
        }
        attached
    }

    /// Deliver every queued backend signal, in order
    ///
    /// Returns the number of signals handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(signal) = self.binding.next_signal() {
            self.handle_signal(signal);
            handled += 1;
        }
        handled
    }

    /// Single entry point for backend lifecycle signals
    pub fn handle_signal(&mut self, signal: BackendSignal) {
        if !self.binding.is_attached() {
            warn!("Dropping {:?}: no player handle", signal);
            return;
        }

        match signal {
            BackendSignal::Ready => self.on_ready(),
            BackendSignal::StateChange(status) => self.on_state_change(status),
        }
    }

    fn on_ready(&mut self) {
        if self.phase == BindingPhase::Ready {
            debug!("Ignoring repeated readiness signal");
            return;
        }
        self.phase = BindingPhase::Ready;
        info!("Player ready for {}", self.uid());

        self.seek_to(self.start_at(), true);

        if self.config.autoplay {
            if self.config.always_play || self.state.intersecting {
                self.start_playback();
                self.notify(BackgroundEvent::Play);
            } else {
                debug!("Autoplay deferred until the background is in view");
                self.autoplay_deferred = true;
            }
        }

        self.reveal_surface();
    }

    fn on_state_change(&mut self, status: PlayerStatus) {
        if self.phase != BindingPhase::Ready {
            debug!("State change {} before readiness", status);
        }

        match status {
            PlayerStatus::Ended if self.config.loop_playback => {
                // Silent restart; the host already saw the original play
                debug!("Looping from {}s", self.config.start_at);
                self.seek_to(self.start_at(), true);
                if let Some(handle) = self.binding.handle_mut() {
                    handle.play_video();
                }
            }
            PlayerStatus::Unstarted if self.config.autoplay => {
                debug!("Player reset to unstarted, restarting autoplay");
                self.seek_to(self.start_at(), true);
                self.start_playback();
                self.notify(BackgroundEvent::Play);
            }
            _ => {}
        }

        if let Some(callback) = self.on_status_change.as_mut() {
            callback(status);
        }
    }

    /// Issue play on the handle and record it locally
    fn start_playback(&mut self) {
        if let Some(handle) = self.binding.handle_mut() {
            handle.play_video();
            self.state.playing = true;
            self.autoplay_deferred = false;
        }
    }

    fn reveal_surface(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.reveal();
            self.env.host.update_surface(surface);
        }
    }

    // ========================================
    // Commands
    // ========================================

    /// Start or resume playback
    pub fn play(&mut self) {
        let start_at = self.start_at();
        let Some(handle) = self.binding.handle_mut() else {
            return;
        };

        if start_at > 0.0 && handle.current_time() < start_at {
            handle.seek_to(start_at, true);
        }
        handle.play_video();
        self.state.playing = true;
        self.autoplay_deferred = false;
        self.notify(BackgroundEvent::Play);
    }

    /// Pause playback
    ///
    /// The local state becomes paused even without a handle.
    pub fn pause(&mut self) {
        self.state.playing = false;
        self.autoplay_deferred = false;

        let Some(handle) = self.binding.handle_mut() else {
            return;
        };
        handle.pause_video();
        self.notify(BackgroundEvent::Pause);
    }

    /// Pause for an automatic reason (e.g. scrolled out of view)
    ///
    /// Only acts while marked playing, and keeps that mark so a later
    /// [`soft_play`](Self::soft_play) resumes.
    pub fn soft_pause(&mut self) {
        if !self.state.playing {
            return;
        }
        let Some(handle) = self.binding.handle_mut() else {
            return;
        };
        handle.pause_video();
        self.notify(BackgroundEvent::Pause);
    }

    /// Resume after an automatic interruption
    ///
    /// Only acts while marked playing; never starts a paused background.
    pub fn soft_play(&mut self) {
        if !self.state.playing {
            return;
        }
        let Some(handle) = self.binding.handle_mut() else {
            return;
        };
        handle.play_video();
        self.notify(BackgroundEvent::Play);
    }

    pub fn mute(&mut self) {
        let Some(handle) = self.binding.handle_mut() else {
            return;
        };
        handle.mute();
        self.state.muted = true;
        self.notify(BackgroundEvent::Mute);
    }

    /// Unmute, applying the configured volume the first time
    pub fn unmute(&mut self) {
        if !self.binding.is_attached() {
            return;
        }
        self.state.muted = false;

        if !self.state.volume_applied_once {
            self.state.volume_applied_once = true;
            self.set_volume(self.config.volume);
        }

        if let Some(handle) = self.binding.handle_mut() {
            handle.un_mute();
        }
        self.notify(BackgroundEvent::Unmute);
    }

    /// Set the volume as a fraction (0.0-1.0)
    pub fn set_volume(&mut self, volume: f64) {
        let Some(handle) = self.binding.handle_mut() else {
            return;
        };
        let level = (volume.clamp(0.0, 1.0) * 100.0).round() as u8;
        handle.set_volume(level);
        self.notify(BackgroundEvent::VolumeChange);
    }

    /// Seek without changing local state or notifying
    pub fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool) {
        if let Some(handle) = self.binding.handle_mut() {
            handle.seek_to(seconds, allow_seek_ahead);
        }
    }

    /// Visibility signal from the host's intersection observer
    ///
    /// Unless `always-play` is set, entering the viewport resumes playback
    /// (or starts a deferred autoplay) and leaving it pauses softly.
    pub fn set_intersecting(&mut self, intersecting: bool) {
        self.state.intersecting = intersecting;
        if self.config.always_play {
            return;
        }

        if intersecting {
            if self.autoplay_deferred && self.phase == BindingPhase::Ready {
                self.play();
            } else {
                self.soft_play();
            }
        } else {
            self.soft_pause();
        }
    }

    /// Re-run cover sizing after a host layout change
    pub fn resize(&mut self) {
        if self.config.fit_box {
            return;
        }
        let (Some(surface), Some(resizer)) = (self.surface.as_mut(), self.env.resizer.as_ref()) else {
            return;
        };
        resizer.cover(surface, self.config.resolution_mod(), self.config.offset);
        self.env.host.update_surface(surface);
    }

    /// Remove the surface from the host and drop the handle
    pub fn destroy(self) {
        if let Some(surface) = &self.surface {
            info!("Removing background surface {}", surface.id);
            self.env.host.remove_surface(&surface.id);
        }
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        self.video_id.as_ref()
    }

    pub fn uid(&self) -> &str {
        self.env.host.uid()
    }

    pub fn phase(&self) -> BindingPhase {
        self.phase
    }

    pub fn state(&self) -> LocalState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    pub fn is_muted(&self) -> bool {
        self.state.muted
    }

    /// Whether construction was aborted for a bad video identifier
    pub fn is_inert(&self) -> bool {
        self.video_id.is_none()
    }

    pub fn surface(&self) -> Option<&EmbedSurface> {
        self.surface.as_ref()
    }

    /// Instance state as carried by notifications
    pub fn snapshot(&self) -> Option<BackgroundSnapshot> {
        let video_id = self.video_id.clone()?;
        Some(BackgroundSnapshot {
            uid: self.uid().to_string(),
            video_id,
            phase: self.phase,
            playing: self.state.playing,
            muted: self.state.muted,
            volume_applied_once: self.state.volume_applied_once,
            intersecting: self.state.intersecting,
        })
    }

    fn start_at(&self) -> f64 {
        f64::from(self.config.start_at)
    }

    fn notify(&self, kind: BackgroundEvent) {
        if let Some(detail) = self.snapshot() {
            notify::emit(&*self.env.host, kind, detail);
        }
    }
}

impl std::fmt::Debug for VideoBackground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoBackground")
            .field("uid", &self.uid())
            .field("video_id", &self.video_id)
            .field("phase", &self.phase)
            .field("state", &self.state)
            .field("binding", &self.binding)
            .finish()
    }
}
