pub mod projection_handlers;

pub use projection_handlers::*;

use finproj_core::analysis::MAX_SWEEP_STEPS;

/// Shared, read-only server settings
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server-side cap on sweep runs; never above the engine's own limit
    pub max_sweep_steps: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            max_sweep_steps: MAX_SWEEP_STEPS,
        }
    }
}
