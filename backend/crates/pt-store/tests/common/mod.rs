#![allow(dead_code)]

//! Test infrastructure for pt-store repository tests

use pt_core::{Gender, Patient, PatientId};
use pt_store::FilePatientRepository;

use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const DATA_FILE: &str = "data/list_patients.json";

/// Repository over a fresh temp dir; keep the `TempDir` alive for the test
pub async fn create_test_repo() -> (TempDir, FilePatientRepository) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let repo = FilePatientRepository::open(temp.path().join(DATA_FILE))
        .await
        .expect("Failed to open repository");
    (temp, repo)
}

pub fn data_path(temp: &TempDir) -> PathBuf {
    temp.path().join(DATA_FILE)
}

pub fn create_test_patient(fullname: &str) -> Patient {
    Patient::new(fullname, "2000-01-01", Gender::Female)
}

/// Patient with a fixed id, for seeding files directly
pub fn stored_patient(fullname: &str, guid: &str) -> Patient {
    let mut patient = Patient::new(fullname, "1985-03-12", Gender::Male);
    patient.guid = PatientId::from(guid);
    patient
}

pub fn write_patients_file(path: &Path, patients: &[Patient]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create data dir");
    }
    let mut data = serde_json::to_vec(patients).expect("Failed to serialize patients");
    data.push(b'\n');
    std::fs::write(path, data).expect("Failed to write patients file");
}

pub fn read_patients_file(path: &Path) -> Vec<Patient> {
    let data = std::fs::read(path).expect("Failed to read patients file");
    serde_json::from_slice(&data).expect("Failed to parse patients file")
}
