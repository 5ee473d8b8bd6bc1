use crate::ApiError;

use pt_core::PatientId;
use pt_store::StoreError;

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http_body_util::BodyExt;
use axum::http::StatusCode;

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_not_found_returns_404_with_flat_error_body() {
    let error = ApiError::NotFound {
        message: "patient not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "patient not found"})
    );
}

#[tokio::test]
async fn test_timeout_returns_408_with_fixed_message() {
    let error = ApiError::Timeout {
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body_json(response).await["error"], "request timeout");
}

#[tokio::test]
async fn test_bad_request_returns_400() {
    let error = ApiError::BadRequest {
        message: "invalid request body".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid request body");
}

#[tokio::test]
async fn test_internal_error_returns_500_and_echoes_details() {
    let error = ApiError::Internal {
        message: "disk on fire".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "disk on fire");
}

#[test]
fn test_store_not_found_converts_to_not_found() {
    let store_error = StoreError::NotFound {
        guid: PatientId::from("missing"),
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error = ApiError::from(store_error);

    assert_eq!(api_error.status(), StatusCode::NOT_FOUND);
    match api_error {
        ApiError::NotFound { message, .. } => assert_eq!(message, "patient not found"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_store_io_error_converts_to_internal() {
    let store_error = StoreError::Io {
        path: "data/list_patients.json".into(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error = ApiError::from(store_error);

    assert_eq!(api_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    match api_error {
        ApiError::Internal { message, .. } => {
            assert!(message.contains("list_patients.json"));
            assert!(message.contains("denied"));
            assert!(!message.contains(".rs:"), "location leaked: {message}");
        }
        other => panic!("Expected Internal, got {:?}", other),
    }
}

#[tokio::test]
async fn test_store_failure_turns_not_found_into_500_with_plain_message() {
    let store_error = StoreError::NotFound {
        guid: PatientId::from("missing"),
        location: ErrorLocation::from(Location::caller()),
    };

    let response = ApiError::store_failure(store_error).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "patient with GUID missing not found"})
    );
}
