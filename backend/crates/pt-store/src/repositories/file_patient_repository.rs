//! Patient repository backed by a single JSON file.
//!
//! ## Persistence
//!
//! The whole collection lives in one file as a JSON array. It is read
//! once, on first access, and kept in memory afterwards; every mutation
//! rewrites the entire file from the in-memory collection followed by a
//! trailing newline. There is no write-to-temp-then-rename, so a crash in
//! the middle of a write can leave a truncated file behind.
//!
//! ## Locking
//!
//! One mutex covers the full load/modify/save sequence of each operation.
//! If a save fails the in-memory change is rolled back, so memory never
//! runs ahead of the file.

use crate::{PatientStorage, Result as StoreResult, StoreError};

use pt_core::{Patient, PatientId};

use std::panic::Location;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::{debug, info};
use tokio::sync::Mutex;

pub struct FilePatientRepository {
    path: PathBuf,
    /// `None` until the file has been read
    patients: Mutex<Option<Vec<Patient>>>,
}

impl FilePatientRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            patients: Mutex::new(None),
        }
    }

    /// Like `new`, but first creates the parent directory and seeds an
    /// empty array when the data file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let repo = Self::new(path);

        let exists = tokio::fs::try_exists(&repo.path)
            .await
            .map_err(|source| repo.io_error(source))?;

        if !exists {
            if let Some(parent) = repo.path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StoreError::Io {
                        path: parent.to_path_buf(),
                        source,
                        location: ErrorLocation::from(Location::caller()),
                    })?;
            }

            repo.write_file(&[]).await?;
            info!("Created empty patient file {}", repo.path.display());
        }

        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[track_caller]
    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    fn json_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Json {
            path: self.path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    async fn read_file(&self) -> StoreResult<Vec<Patient>> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        let patients: Vec<Patient> =
            serde_json::from_slice(&data).map_err(|source| self.json_error(source))?;

        debug!(
            "Loaded {} patients from {}",
            patients.len(),
            self.path.display()
        );

        Ok(patients)
    }

    async fn write_file(&self, patients: &[Patient]) -> StoreResult<()> {
        let mut data = serde_json::to_vec(patients).map_err(|source| self.json_error(source))?;
        data.push(b'\n');

        tokio::fs::write(&self.path, data)
            .await
            .map_err(|source| self.io_error(source))?;

        debug!(
            "Saved {} patients to {}",
            patients.len(),
            self.path.display()
        );

        Ok(())
    }

    /// Read the file into `slot` on first use and hand back the collection.
    async fn loaded<'a>(
        &self,
        slot: &'a mut Option<Vec<Patient>>,
    ) -> StoreResult<&'a mut Vec<Patient>> {
        if slot.is_none() {
            *slot = Some(self.read_file().await?);
        }

        Ok(slot.get_or_insert_with(Vec::new))
    }

    #[track_caller]
    fn not_found(guid: &PatientId) -> StoreError {
        StoreError::NotFound {
            guid: guid.clone(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[async_trait]
impl PatientStorage for FilePatientRepository {
    async fn create(&self, mut patient: Patient) -> StoreResult<Patient> {
        let mut slot = self.patients.lock().await;
        let patients = self.loaded(&mut slot).await?;

        patient.guid = PatientId::generate();
        while patients.iter().any(|p| p.guid == patient.guid) {
            patient.guid = PatientId::generate();
        }

        patients.push(patient.clone());
        if let Err(e) = self.write_file(patients.as_slice()).await {
            patients.pop();
            return Err(e);
        }

        info!("Created patient {}", patient.guid);
        Ok(patient)
    }

    async fn find_all(&self) -> StoreResult<Vec<Patient>> {
        let mut slot = self.patients.lock().await;
        let patients = self.loaded(&mut slot).await?;

        Ok(patients.clone())
    }

    async fn update(&self, patient: Patient) -> StoreResult<Patient> {
        let mut slot = self.patients.lock().await;
        let patients = self.loaded(&mut slot).await?;

        let index = patients
            .iter()
            .position(|p| p.guid == patient.guid)
            .ok_or_else(|| Self::not_found(&patient.guid))?;

        let previous = std::mem::replace(&mut patients[index], patient.clone());
        if let Err(e) = self.write_file(patients.as_slice()).await {
            patients[index] = previous;
            return Err(e);
        }

        info!("Updated patient {}", patient.guid);
        Ok(patient)
    }

    async fn delete(&self, id: &PatientId) -> StoreResult<()> {
        let mut slot = self.patients.lock().await;
        let patients = self.loaded(&mut slot).await?;

        let index = patients
            .iter()
            .position(|p| &p.guid == id)
            .ok_or_else(|| Self::not_found(id))?;

        let removed = patients.remove(index);
        if let Err(e) = self.write_file(patients.as_slice()).await {
            patients.insert(index, removed);
            return Err(e);
        }

        info!("Deleted patient {}", id);
        Ok(())
    }
}
