//! Notification emitter
//!
//! Fire-and-forget dispatch of transition notifications on the host element.
//! Emission is synchronous: listeners observe the notification before the
//! command or signal handler that triggered it returns.

use crate::host::Host;
use tracing::debug;
use vbg_common::events::{BackgroundEvent, BackgroundSnapshot, Notification};

/// Dispatch a bubbling `kind` notification carrying `detail`
pub fn emit(host: &dyn Host, kind: BackgroundEvent, detail: BackgroundSnapshot) {
    debug!(uid = %detail.uid, "Dispatching {}", kind);
    host.dispatch(&Notification::new(kind, detail));
}
