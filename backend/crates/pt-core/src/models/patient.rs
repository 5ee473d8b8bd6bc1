//! Patient entity - the single record kept by the registry.

use crate::{Gender, PatientId};

use serde::{Deserialize, Serialize};

/// A registered patient.
///
/// Every field falls back to its default when missing from the input, so a
/// body carrying only `guid` still decodes (edit/delete requests).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub fullname: String,
    pub birthday: String,
    pub gender: Gender,
    /// Empty until the repository assigns one on create
    pub guid: PatientId,
}

impl Patient {
    pub fn new(fullname: impl Into<String>, birthday: impl Into<String>, gender: Gender) -> Self {
        Self {
            fullname: fullname.into(),
            birthday: birthday.into(),
            gender,
            guid: PatientId::default(),
        }
    }

    pub fn id(&self) -> &PatientId {
        &self.guid
    }

    pub fn has_id(&self) -> bool {
        !self.guid.is_empty()
    }
}
