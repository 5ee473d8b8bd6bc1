pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::gender::Gender;
pub use models::patient::Patient;
pub use models::patient_id::PatientId;
