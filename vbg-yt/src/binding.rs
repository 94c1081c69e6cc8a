//! Player binding
//!
//! Owns the optional player handle and the receiving end of its signal
//! channel. A handle is attached at most once, and only after the backend
//! has registered; until then every accessor reports absence.

use crate::backend::{BackendRegistry, BackendSignal, PlayerHandle};
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

/// Attach-once holder for the external player handle
#[derive(Default)]
pub struct PlayerBinding {
    handle: Option<Box<dyn PlayerHandle>>,
    signals: Option<mpsc::UnboundedReceiver<BackendSignal>>,
}

impl PlayerBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a handle for `surface_id` if the backend is registered and no
    /// handle exists yet
    ///
    /// Returns `true` only for the call that created the handle.
    pub fn attach(&mut self, registry: &dyn BackendRegistry, surface_id: &str) -> bool {
        if self.handle.is_some() {
            trace!("Player already bound to {}", surface_id);
            return false;
        }
        if !registry.is_registered() {
            debug!("Player API not registered yet, deferring binding of {}", surface_id);
            return false;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.handle = Some(registry.create_player(surface_id, tx));
        self.signals = Some(rx);
        info!("Bound player handle to surface {}", surface_id);
        true
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Mutable access to the handle, if attached
    pub fn handle_mut(&mut self) -> Option<&mut (dyn PlayerHandle + 'static)> {
        self.handle.as_deref_mut()
    }

    /// Shared access to the handle, if attached
    pub fn handle(&self) -> Option<&(dyn PlayerHandle + 'static)> {
        self.handle.as_deref()
    }

    /// Next queued backend signal, in delivery order
    pub fn next_signal(&mut self) -> Option<BackendSignal> {
        self.signals.as_mut()?.try_recv().ok()
    }
}

impl std::fmt::Debug for PlayerBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerBinding")
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SignalSender;
    use std::cell::{Cell, RefCell};
    use vbg_common::events::PlayerStatus;

    struct NullHandle;

    impl PlayerHandle for NullHandle {
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

    #[derive(Default)]
    struct Registry {
        registered: Cell<bool>,
        created: Cell<usize>,
        sender: RefCell<Option<SignalSender>>,
    }

    impl BackendRegistry for Registry {
        fn is_registered(&self) -> bool {
            self.registered.get()
        }

        fn create_player(&self, _surface_id: &str, signals: SignalSender) -> Box<dyn PlayerHandle> {
            self.created.set(self.created.get() + 1);
            *self.sender.borrow_mut() = Some(signals);
            Box::new(NullHandle)
        }
    }

    #[test]
    fn test_attach_waits_for_registration() {
        let registry = Registry::default();
        let mut binding = PlayerBinding::new();

        assert!(!binding.attach(&registry, "vbg-1"));
        assert!(!binding.is_attached());
        assert!(binding.handle_mut().is_none());
        assert_eq!(binding.next_signal(), None);

        registry.registered.set(true);
        assert!(binding.attach(&registry, "vbg-1"));
        assert!(binding.is_attached());
    }

    #[test]
    fn test_attach_once() {
        let registry = Registry::default();
        registry.registered.set(true);
        let mut binding = PlayerBinding::new();

        assert!(binding.attach(&registry, "vbg-1"));
        assert!(!binding.attach(&registry, "vbg-1"));
        assert!(!binding.attach(&registry, "vbg-1"));
        assert_eq!(registry.created.get(), 1);
    }

    #[test]
    fn test_signals_in_order() {
        let registry = Registry::default();
        registry.registered.set(true);
        let mut binding = PlayerBinding::new();
        binding.attach(&registry, "vbg-1");

        let tx = registry.sender.borrow_mut().take().unwrap();
        tx.send(BackendSignal::Ready).unwrap();
        tx.send(BackendSignal::StateChange(PlayerStatus::Playing)).unwrap();

        assert_eq!(binding.next_signal(), Some(BackendSignal::Ready));
        assert_eq!(
            binding.next_signal(),
            Some(BackendSignal::StateChange(PlayerStatus::Playing))
        );
        assert_eq!(binding.next_signal(), None);
    }
}
