// Application state module
// Immutable per-process state shared by every connection

use super::types::Config;
use crate::handler::Fixture;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Route table this process serves
    pub fixture: Fixture,
}

impl AppState {
    pub fn new(config: Config, fixture: Fixture) -> Self {
        Self { config, fixture }
    }
}
