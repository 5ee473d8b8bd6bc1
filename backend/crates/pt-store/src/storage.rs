use crate::Result as StoreResult;

use pt_core::{Patient, PatientId};

use async_trait::async_trait;

/// Capability set the HTTP layer needs from a patient store.
///
/// Implementations own the collection; callers only hand records in and
/// get copies back.
#[async_trait]
pub trait PatientStorage: Send + Sync {
    /// Assign a fresh id, persist the patient and return the stored record
    async fn create(&self, patient: Patient) -> StoreResult<Patient>;

    /// Every stored patient, in insertion order
    async fn find_all(&self) -> StoreResult<Vec<Patient>>;

    /// Replace the record whose id matches `patient.guid`
    async fn update(&self, patient: Patient) -> StoreResult<Patient>;

    async fn delete(&self, id: &PatientId) -> StoreResult<()>;
}
