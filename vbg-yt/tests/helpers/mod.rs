//! Shared test fixtures
//!
//! - `FakeBackend`: registry whose handles record every command
//! - `RecordingResizer`: cover-resize collaborator that records its inputs
//! - `Harness`: wires a background to a headless host and drains its notifications

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::sync::broadcast;
use vbg_common::events::{BackgroundEvent, Notification, PlayerStatus};
use vbg_yt::backend::{BackendRegistry, BackendSignal, PlayerHandle, SignalSender};
use vbg_yt::headless::{HeadlessDocument, HeadlessHost};
use vbg_yt::host::CoverResize;
use vbg_yt::{BackgroundConfig, BackgroundEnv, EmbedSurface, VideoBackground};

/// Command issued on a fake handle
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SeekTo(f64, bool),
    Play,
    Pause,
    Mute,
    UnMute,
    SetVolume(u8),
}

#[derive(Default)]
pub struct FakeBackend {
    registered: Cell<bool>,
    created: Cell<usize>,
    calls: Rc<RefCell<Vec<Call>>>,
    current_time: Rc<Cell<f64>>,
    sender: RefCell<Option<SignalSender>>,
}

impl FakeBackend {
    pub fn new(registered: bool) -> Rc<Self> {
        let backend = Self::default();
        backend.registered.set(registered);
        Rc::new(backend)
    }

    pub fn register(&self) {
        self.registered.set(true);
    }

    /// Number of handles created so far
    pub fn created(&self) -> usize {
        self.created.get()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn set_current_time(&self, seconds: f64) {
        self.current_time.set(seconds);
    }

    /// Deliver a signal through the channel handed over at creation
    pub fn send(&self, signal: BackendSignal) {
        self.sender
            .borrow()
            .as_ref()
            .expect("no handle created yet")
            .send(signal)
            .expect("background dropped its receiver");
    }

    pub fn ready(&self) {
        self.send(BackendSignal::Ready);
    }

    pub fn status(&self, code: i32) {
        self.send(BackendSignal::StateChange(PlayerStatus::from_code(code)));
    }
}

impl BackendRegistry for FakeBackend {
    fn is_registered(&self) -> bool {
        self.registered.get()
    }

    fn create_player(&self, _surface_id: &str, signals: SignalSender) -> Box<dyn PlayerHandle> {
        self.created.set(self.created.get() + 1);
        *self.sender.borrow_mut() = Some(signals);
        Box::new(FakeHandle {
            calls: self.calls.clone(),
            current_time: self.current_time.clone(),
        })
    }
}

struct FakeHandle {
    calls: Rc<RefCell<Vec<Call>>>,
    current_time: Rc<Cell<f64>>,
}

impl PlayerHandle for FakeHandle {
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool) {
        self.calls
            .borrow_mut()
            .push(Call::SeekTo(seconds, allow_seek_ahead));
        self.current_time.set(seconds);
    }

    fn play_video(&mut self) {
        self.calls.borrow_mut().push(Call::Play);
    }

    fn pause_video(&mut self) {
        self.calls.borrow_mut().push(Call::Pause);
    }

    fn mute(&mut self) {
        self.calls.borrow_mut().push(Call::Mute);
    }

    fn un_mute(&mut self) {
        self.calls.borrow_mut().push(Call::UnMute);
    }

    fn set_volume(&mut self, volume: u8) {
        self.calls.borrow_mut().push(Call::SetVolume(volume));
    }

    fn current_time(&self) -> f64 {
        self.current_time.get()
    }
}

/// Records every cover-resize request
#[derive(Default)]
pub struct RecordingResizer {
    pub requests: RefCell<Vec<(String, f64, f64)>>,
}

impl CoverResize for RecordingResizer {
    fn cover(&self, surface: &mut EmbedSurface, resolution_mod: f64, offset: f64) {
        self.requests
            .borrow_mut()
            .push((surface.id.clone(), resolution_mod, offset));
        surface.style.set("width", "1280px");
        surface.style.set("height", "720px");
    }
}

pub struct Harness {
    pub host: Rc<HeadlessHost>,
    pub document: Rc<HeadlessDocument>,
    pub backend: Rc<FakeBackend>,
    pub resizer: Rc<RecordingResizer>,
    rx: broadcast::Receiver<Notification>,
}

impl Harness {
    pub fn new(registered: bool) -> Self {
        let host = Rc::new(HeadlessHost::with_uid("vbg-test"));
        let rx = host.subscribe();
        Self {
            host,
            document: Rc::new(HeadlessDocument::new()),
            backend: FakeBackend::new(registered),
            resizer: Rc::new(RecordingResizer::default()),
            rx,
        }
    }

    pub fn env(&self) -> BackgroundEnv {
        BackgroundEnv {
            host: self.host.clone(),
            document: self.document.clone(),
            registry: self.backend.clone(),
            resizer: Some(self.resizer.clone()),
        }
    }

    pub fn build(&self, config: BackgroundConfig) -> VideoBackground {
        VideoBackground::new(config, "abc123", self.env())
    }

    /// Build, bind and deliver readiness
    pub fn build_ready(&mut self, config: BackgroundConfig) -> VideoBackground {
        let mut background = self.build(config);
        self.backend.ready();
        background.pump();
        background
    }

    /// Notifications emitted since the last call
    pub fn notifications(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(notification) = self.rx.try_recv() {
            out.push(notification);
        }
        out
    }

    /// Kinds of notifications emitted since the last call
    pub fn kinds(&mut self) -> Vec<BackgroundEvent> {
        self.notifications().into_iter().map(|n| n.kind).collect()
    }
}

/// Configuration with autoplay off, so readiness alone issues no play
pub fn quiet_config() -> BackgroundConfig {
    BackgroundConfig {
        autoplay: false,
        ..Default::default()
    }
}
