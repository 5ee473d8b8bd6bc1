use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Patient gender, stored on the wire as its integer code.
///
/// Codes other than 0 and 1 are kept as `Other` and written back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other(i32),
}

impl Gender {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Male,
            1 => Self::Female,
            other => Self::Other(other),
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
            Self::Other(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other(_) => "other",
        }
    }
}

/// Strict conversion: only the known codes 0 and 1
impl TryFrom<i32> for Gender {
    type Error = CoreError;

    #[track_caller]
    fn try_from(value: i32) -> CoreErrorResult<Self> {
        match value {
            0 => Ok(Self::Male),
            1 => Ok(Self::Female),
            _ => Err(CoreError::InvalidGender {
                value,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl From<Gender> for i32 {
    fn from(gender: Gender) -> Self {
        gender.as_i32()
    }
}

impl Serialize for Gender {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Gender::from_code)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
