//! In-memory host and document
//!
//! Lets a background run without a browser: surfaces are kept in a list and
//! notifications are published on a [`NotificationBus`]. Used by the
//! command-line tool to render markup, and by tests.

use crate::backend::{BackendRegistry, PlayerHandle, ScriptDocument, SignalSender};
use crate::embed::EmbedSurface;
use crate::host::Host;
use std::cell::{Cell, RefCell};
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;
use vbg_common::events::{Notification, NotificationBus};

/// Host element kept entirely in memory
#[derive(Debug)]
pub struct HeadlessHost {
    uid: String,
    intersecting: Cell<bool>,
    surfaces: RefCell<Vec<EmbedSurface>>,
    bus: NotificationBus,
}

impl HeadlessHost {
    /// Host with a freshly generated `vbg-xxxxxxxx` uid
    pub fn new() -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self::with_uid(format!("vbg-{}", &id[..8]))
    }

    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            intersecting: Cell::new(false),
            surfaces: RefCell::new(Vec::new()),
            bus: NotificationBus::default(),
        }
    }

    /// Set the intersection reported to newly constructed backgrounds
    pub fn set_intersecting(&self, intersecting: bool) {
        self.intersecting.set(intersecting);
    }

    /// Snapshot of all appended surfaces
    pub fn surfaces(&self) -> Vec<EmbedSurface> {
        self.surfaces.borrow().clone()
    }

    /// Current state of the surface with this id
    pub fn surface(&self, id: &str) -> Option<EmbedSurface> {
        self.surfaces.borrow().iter().find(|s| s.id == id).cloned()
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.bus.subscribe()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for HeadlessHost {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn is_intersecting(&self) -> bool {
        self.intersecting.get()
    }

    fn append_surface(&self, surface: &EmbedSurface) {
        self.surfaces.borrow_mut().push(surface.clone());
    }

    fn update_surface(&self, surface: &EmbedSurface) {
        let mut surfaces = self.surfaces.borrow_mut();
        if let Some(existing) = surfaces.iter_mut().find(|s| s.id == surface.id) {
            *existing = surface.clone();
        }
    }

    fn remove_surface(&self, surface_id: &str) {
        self.surfaces.borrow_mut().retain(|s| s.id != surface_id);
    }

    fn dispatch(&self, notification: &Notification) {
        trace!("{} on {}", notification.name(), self.uid);
        self.bus.emit_lossy(notification.clone());
    }
}

/// Document whose script list lives in memory
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    scripts: RefCell<Vec<String>>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scripts<I, S>(scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scripts: RefCell::new(scripts.into_iter().map(Into::into).collect()),
        }
    }

    /// Script sources in document order
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }
}

impl ScriptDocument for HeadlessDocument {
    fn has_script(&self, src: &str) -> bool {
        self.scripts.borrow().iter().any(|s| s == src)
    }

    fn insert_script_first(&self, src: &str) {
        self.scripts.borrow_mut().insert(0, src.to_string());
    }
}

/// Registry for environments without a player backend
///
/// Never reports registration, so backgrounds built against it stay in the
/// `Unbound` phase and only their surface is produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineRegistry;

impl BackendRegistry for OfflineRegistry {
    fn is_registered(&self) -> bool {
        false
    }

    fn create_player(&self, _surface_id: &str, _signals: SignalSender) -> Box<dyn PlayerHandle> {
        Box::new(DetachedHandle)
    }
}

/// Handle that ignores every command
struct DetachedHandle;

impl PlayerHandle for DetachedHandle {
    fn seek_to(&mut self, _seconds: f64, _allow_seek_ahead: bool) {}
    fn play_video(&mut self) {}
    fn pause_video(&mut self) {}
    fn mute(&mut self) {}
    fn un_mute(&mut self) {}
    fn set_volume(&mut self, _volume: u8) {}
    fn current_time(&self) -> f64 {
        0.0
    }
}
