//! Patient REST API handlers
//!
//! Each handler decodes the body, runs one storage call on its own task
//! under the request deadline and maps the outcome to a response. A call
//! that outlives the deadline keeps running in the background; only the
//! client gets the 408.

use crate::{ApiError, ApiResult, AppState};

use pt_core::Patient;
use pt_store::{Result as StoreResult, StoreError};

use std::future::Future;
use std::panic::Location;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use error_location::ErrorLocation;
use log::warn;

pub const DELETED_MESSAGE: &str = "deleted";

// =============================================================================
// Handlers
// =============================================================================

/// POST /patient
///
/// Register a new patient; any `guid` in the body is replaced
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let Json(patient) = payload?;

    let storage = state.storage.clone();
    let created = run_with_deadline(&state, "create", ApiError::from, async move {
        storage.create(patient).await
    })
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /patients
///
/// List every stored patient
pub async fn list_patients(State(state): State<AppState>) -> ApiResult<Json<Vec<Patient>>> {
    let storage = state.storage.clone();
    let patients = run_with_deadline(&state, "list", ApiError::from, async move {
        storage.find_all().await
    })
    .await?;

    Ok(Json(patients))
}

/// POST /patient/edit
///
/// Replace the patient whose `guid` matches the body. An unknown `guid`
/// is a storage failure here (500), unlike delete.
pub async fn edit_patient(
    State(state): State<AppState>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> ApiResult<Json<Patient>> {
    let Json(patient) = payload.map_err(ApiError::invalid_body)?;

    let storage = state.storage.clone();
    let updated = run_with_deadline(&state, "edit", ApiError::store_failure, async move {
        storage.update(patient).await
    })
    .await?;

    Ok(Json(updated))
}

/// POST /patient/delete
///
/// Remove the patient whose `guid` matches the body
pub async fn delete_patient(
    State(state): State<AppState>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> ApiResult<Json<&'static str>> {
    let Json(patient) = payload.map_err(ApiError::invalid_body)?;

    let storage = state.storage.clone();
    let id = patient.guid;
    run_with_deadline(&state, "delete", ApiError::from, async move {
        storage.delete(&id).await
    })
    .await?;

    Ok(Json(DELETED_MESSAGE))
}

// =============================================================================
// Helpers
// =============================================================================

/// Spawn `call` and wait for it at most `state.request_timeout`; storage
/// errors go through `map_store`.
///
/// On timeout the spawned task is detached, not aborted.
async fn run_with_deadline<T, F>(
    state: &AppState,
    operation: &'static str,
    map_store: fn(StoreError) -> ApiError,
    call: F,
) -> ApiResult<T>
where
    T: Send + 'static,
    F: Future<Output = StoreResult<T>> + Send + 'static,
{
    let handle = tokio::spawn(call);

    match tokio::time::timeout(state.request_timeout, handle).await {
        Ok(Ok(result)) => result.map_err(map_store),
        Ok(Err(join_error)) => Err(ApiError::from(join_error)),
        Err(_elapsed) => {
            warn!(
                "Patient {} exceeded {}ms, storage call left running",
                operation,
                state.request_timeout.as_millis()
            );
            Err(ApiError::Timeout {
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}
