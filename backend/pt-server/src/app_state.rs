use pt_store::PatientStorage;

use std::sync::Arc;
use std::time::Duration;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn PatientStorage>,
    /// Deadline for a single storage call
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(storage: Arc<dyn PatientStorage>, request_timeout: Duration) -> Self {
        Self {
            storage,
            request_timeout,
        }
    }
}
