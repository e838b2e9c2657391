//! Error taxonomy.
//!
//! Setup problems surface as [`FermatError::InvalidConfiguration`] before
//! any iteration runs. Measurement problems surface as
//! [`FermatError::NumericDegenerate`] and leave the relaxed trajectory
//! untouched. A rejected Monte-Carlo proposal is never an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FermatError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("numerically degenerate measurement: {0}")]
    NumericDegenerate(String),
}

impl FermatError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        FermatError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        FermatError::NumericDegenerate(msg.into())
    }
}

pub type FermatResult<T> = Result<T, FermatError>;
