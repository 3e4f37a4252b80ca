//! Shared application state.

use std::sync::Arc;

use callscribe_core::clock::Clock;
use callscribe_core::repository::CallRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to timestamp record mutations.
    pub clock: Arc<dyn Clock>,
    /// The single store of call records.
    pub call_repository: Arc<dyn CallRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, call_repository: Arc<dyn CallRepository>) -> Self {
        Self {
            clock,
            call_repository,
        }
    }
}
