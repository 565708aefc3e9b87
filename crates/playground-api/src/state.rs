//! Shared application state.

use std::sync::Arc;

use playground_core::clock::Clock;
use playground_session::application::registry::SessionRegistry;

use crate::config::ApiConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock stamped onto every event.
    pub clock: Arc<dyn Clock>,
    /// Mounted sessions.
    pub sessions: SessionRegistry,
    /// Server configuration.
    pub config: Arc<ApiConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state with no mounted sessions.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, config: ApiConfig) -> Self {
        Self {
            clock,
            sessions: SessionRegistry::new(),
            config: Arc::new(config),
        }
    }
}
