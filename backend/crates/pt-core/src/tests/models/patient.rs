use crate::{Gender, Patient, PatientId};

#[test]
fn test_patient_new_has_no_id() {
    let patient = Patient::new("Jane Roe", "1990-05-17", Gender::Female);

    assert_eq!(patient.fullname, "Jane Roe");
    assert_eq!(patient.birthday, "1990-05-17");
    assert_eq!(patient.gender, Gender::Female);
    assert!(!patient.has_id());
}

#[test]
fn test_patient_json_field_names() {
    let mut patient = Patient::new("A", "2000-01-01", Gender::Male);
    patient.guid = PatientId::from("g-1");

    let json = serde_json::to_value(&patient).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "fullname": "A",
            "birthday": "2000-01-01",
            "gender": 0,
            "guid": "g-1"
        })
    );
}

#[test]
fn test_patient_partial_body_uses_defaults() {
    let patient: Patient = serde_json::from_str(r#"{"guid":"unknown"}"#).unwrap();

    assert_eq!(patient.id().as_str(), "unknown");
    assert_eq!(patient.fullname, "");
    assert_eq!(patient.gender, Gender::Male);
}

#[test]
fn test_patient_body_without_guid_decodes_with_empty_id() {
    let patient: Patient =
        serde_json::from_str(r#"{"fullname":"A","birthday":"2000-01-01","gender":1}"#).unwrap();

    assert!(!patient.has_id());
    assert_eq!(patient.gender, Gender::Female);
}
