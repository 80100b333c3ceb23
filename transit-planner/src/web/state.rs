//! Application state for the web layer.

use std::sync::Arc;

use crate::reduce::RosterConfig;

/// Shared application state.
///
/// Read-only: every request runs its reduction from scratch.
#[derive(Clone, Default)]
pub struct AppState {
    /// Shift hours and peak blocks for crew rostering
    pub roster_config: Arc<RosterConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(roster_config: RosterConfig) -> Self {
        Self {
            roster_config: Arc::new(roster_config),
        }
    }
}
