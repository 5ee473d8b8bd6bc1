use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid gender: {value} {location}")]
    InvalidGender {
        value: i32,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
