//! Control errors

use bi_core::{BiError, ValidationErrors};
use thiserror::Error;

/// Errors raised by the explore controls when a caller breaks a precondition
#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("Sort selector needs at least one option")]
    EmptyOptions,
    #[error("Unknown option value {0:?}")]
    UnknownOption(String),
    #[error("Index {index} out of bounds for {len} rules")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Invalid formatting rule: {0}")]
    Validation(#[from] ValidationErrors),
}

pub type ControlResult<T> = Result<T, ControlError>;

impl From<ControlError> for BiError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::Validation(errors) => BiError::Validation(errors),
            other => BiError::Precondition(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_bi_error() {
        let mut errors = ValidationErrors::new();
        errors.add("target_value", "can't be blank");
        let err: BiError = ControlError::Validation(errors).into();
        assert_eq!(err.error_code(), "validation_failed");

        let err: BiError = ControlError::IndexOutOfBounds { index: 3, len: 1 }.into();
        assert_eq!(err.error_code(), "precondition_violated");
        assert_eq!(
            err.to_string(),
            "Precondition violated: Index 3 out of bounds for 1 rules"
        );
    }
}
