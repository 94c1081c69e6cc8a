//! Backend script loader
//!
//! Inserts the player API script at most once per document, no matter how
//! many backgrounds are constructed.

use super::{BackendRegistry, ScriptDocument};
use tracing::{debug, info};

/// Player API script location
pub const PLAYER_API_SRC: &str = "https://www.youtube.com/player_api";

/// Make sure the player API script is requested exactly once
///
/// Returns `true` if a script reference was inserted by this call. Load
/// failures are not observable here; readiness is detected later through
/// [`BackendRegistry::is_registered`].
pub fn ensure_backend_loaded(registry: &dyn BackendRegistry, document: &dyn ScriptDocument) -> bool {
    if registry.is_registered() {
        debug!("Player API already registered, skipping script injection");
        return false;
    }
    if document.has_script(PLAYER_API_SRC) {
        debug!("Player API script already requested");
        return false;
    }

    document.insert_script_first(PLAYER_API_SRC);
    info!("Injected player API script {}", PLAYER_API_SRC);
    true
}
