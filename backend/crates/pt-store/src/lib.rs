pub mod error;
pub mod repositories;
pub mod storage;

pub use error::{Result, StoreError};
pub use repositories::file_patient_repository::FilePatientRepository;
pub use storage::PatientStorage;
