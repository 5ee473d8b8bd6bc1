#![allow(dead_code)]

//! Test infrastructure for pt-server API tests

use pt_core::{Patient, PatientId};
use pt_server::AppState;
use pt_store::{FilePatientRepository, PatientStorage, Result as StoreResult, StoreError};

use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
};
use error_location::ErrorLocation;
use http_body_util::BodyExt;
use tempfile::TempDir;

pub const DATA_FILE: &str = "data/list_patients.json";
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// AppState over a file repository in a fresh temp dir
pub async fn create_test_app_state() -> (TempDir, AppState) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let repo = FilePatientRepository::open(temp.path().join(DATA_FILE))
        .await
        .expect("Failed to open repository");

    (temp, AppState::new(Arc::new(repo), TEST_TIMEOUT))
}

pub fn data_path(temp: &TempDir) -> PathBuf {
    temp.path().join(DATA_FILE)
}

pub fn read_data_file(temp: &TempDir) -> String {
    std::fs::read_to_string(data_path(temp)).expect("Failed to read data file")
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Storage that takes `delay` per call and records when a create finished
pub struct SlowStorage {
    pub delay: Duration,
    pub completed: Arc<AtomicBool>,
}

impl SlowStorage {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            completed: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl PatientStorage for SlowStorage {
    async fn create(&self, mut patient: Patient) -> StoreResult<Patient> {
        tokio::time::sleep(self.delay).await;
        patient.guid = PatientId::generate();
        self.completed.store(true, Ordering::SeqCst);
        Ok(patient)
    }

    async fn find_all(&self) -> StoreResult<Vec<Patient>> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn update(&self, patient: Patient) -> StoreResult<Patient> {
        tokio::time::sleep(self.delay).await;
        Ok(patient)
    }

    async fn delete(&self, _id: &PatientId) -> StoreResult<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Storage whose every call fails with an I/O error
pub struct FailingStorage;

impl FailingStorage {
    fn failure() -> StoreError {
        StoreError::Io {
            path: PathBuf::from(DATA_FILE),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "disk unavailable"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[async_trait]
impl PatientStorage for FailingStorage {
    async fn create(&self, _patient: Patient) -> StoreResult<Patient> {
        Err(Self::failure())
    }

    async fn find_all(&self) -> StoreResult<Vec<Patient>> {
        Err(Self::failure())
    }

    async fn update(&self, _patient: Patient) -> StoreResult<Patient> {
        Err(Self::failure())
    }

    async fn delete(&self, _id: &PatientId) -> StoreResult<()> {
        Err(Self::failure())
    }
}
