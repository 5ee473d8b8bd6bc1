pub mod gender;
pub mod patient;
pub mod patient_id;
