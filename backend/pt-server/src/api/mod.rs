pub mod error;
pub mod patients;
