pub mod file_patient_repository;
