use crate::{AppState, health, request_logging};
use crate::api::patients;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Patient endpoints
        .route("/patient", post(patients::create_patient))
        .route("/patients", get(patients::list_patients))
        .route("/patient/edit", post(patients::edit_patient))
        .route("/patient/delete", post(patients::delete_patient))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        // Add shared state
        .with_state(state)
        .layer(middleware::from_fn(request_logging::log_requests))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
