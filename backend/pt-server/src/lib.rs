pub mod api;
pub mod app;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod request_logging;
pub mod routes;
pub mod shutdown;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    patients::{create_patient, delete_patient, edit_patient, list_patients},
};
pub use app::{App, AppPhase, shutdown_signal};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};
pub use shutdown::{ShutdownCoordinator, ShutdownGuard};

pub use crate::routes::build_router;
