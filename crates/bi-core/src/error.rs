//! Core error types for Explore Controls RS

use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type shared by the workspace
#[derive(Error, Debug)]
pub enum BiError {
    #[error("Parse error in {context}: {message}")]
    Parse { context: String, message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BiError {
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            BiError::Parse { .. } => "parse_error",
            BiError::Validation(_) => "validation_failed",
            BiError::Precondition(_) => "precondition_violated",
            BiError::Config(_) => "configuration_error",
            BiError::Serialization(_) => "serialization_error",
        }
    }
}

/// Validation errors collection, keyed by field
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("Validation errors: {errors:?} {base_errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> messages
    pub errors: BTreeMap<String, Vec<String>>,
    /// Errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub type BiResult<T> = Result<T, BiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("target_value", "can't be blank");
        errors.add_base("rule is incomplete");

        assert!(errors.has_error("target_value"));
        assert!(!errors.has_error("column"));
        assert_eq!(
            errors.full_messages(),
            vec!["rule is incomplete", "target_value can't be blank"]
        );
    }

    #[test]
    fn test_merge_and_into_result() {
        let mut a = ValidationErrors::new();
        a.add("column", "can't be blank");
        let mut b = ValidationErrors::new();
        b.add("column", "is unknown");

        a.merge(b);
        assert_eq!(a.get("column").map(Vec::len), Some(2));
        assert!(a.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_error_codes() {
        let err = BiError::parse("order_by_cols", "expected value");
        assert_eq!(err.error_code(), "parse_error");
        assert_eq!(err.to_string(), "Parse error in order_by_cols: expected value");

        let err: BiError = ValidationErrors::new().into();
        assert_eq!(err.error_code(), "validation_failed");
    }
}
