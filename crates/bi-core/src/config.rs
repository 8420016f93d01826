//! Configuration types and loading

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Defaults applied when building query contexts
    pub query: QueryDefaults,

    /// Defaults for the explore controls
    pub controls: ControlDefaults,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryDefaults {
    /// Result format used when form data does not set one
    pub result_format: String,
    /// Result type used when form data does not set one
    pub result_type: String,
    /// Bypass the query cache
    pub force: bool,
    /// Row limit applied when form data does not set one
    pub row_limit: Option<u64>,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            result_format: "json".to_string(),
            result_type: "full".to_string(),
            force: false,
            row_limit: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ControlDefaults {
    /// Drop formatting rules whose column is no longer selectable
    pub remove_irrelevant_conditions: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,bi_queries=debug,bi_controls=debug".to_string(),
            json: false,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {:?}", value),
        }),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Query
        if let Some(format) = lookup("BI_RESULT_FORMAT") {
            config.query.result_format = format;
        }
        if let Some(result_type) = lookup("BI_RESULT_TYPE") {
            config.query.result_type = result_type;
        }
        if let Some(force) = lookup("BI_FORCE_QUERY") {
            config.query.force = parse_bool("BI_FORCE_QUERY", &force)?;
        }
        if let Some(limit) = lookup("BI_ROW_LIMIT") {
            let limit = limit.parse().map_err(|e| ConfigError::InvalidValue {
                key: "BI_ROW_LIMIT".to_string(),
                message: format!("{}", e),
            })?;
            config.query.row_limit = Some(limit);
        }

        // Controls
        if let Some(remove) = lookup("BI_REMOVE_IRRELEVANT_CONDITIONS") {
            config.controls.remove_irrelevant_conditions =
                parse_bool("BI_REMOVE_IRRELEVANT_CONDITIONS", &remove)?;
        }

        // Logging
        if let Some(filter) = lookup("RUST_LOG") {
            config.logging.filter = filter;
        }
        if let Some(json) = lookup("BI_LOG_JSON") {
            config.logging.json = parse_bool("BI_LOG_JSON", &json)?;
        }

        tracing::debug!(
            result_format = %config.query.result_format,
            result_type = %config.query.result_type,
            force = config.query.force,
            "Configuration loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.query.result_format, "json");
        assert_eq!(config.query.result_type, "full");
        assert!(!config.query.force);
        assert!(!config.controls.remove_irrelevant_conditions);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BI_RESULT_TYPE", "samples"),
            ("BI_FORCE_QUERY", "1"),
            ("BI_ROW_LIMIT", "500"),
            ("BI_REMOVE_IRRELEVANT_CONDITIONS", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.query.result_type, "samples");
        assert!(config.query.force);
        assert_eq!(config.query.row_limit, Some(500));
        assert!(config.controls.remove_irrelevant_conditions);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("BI_FORCE_QUERY", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "BI_FORCE_QUERY"));

        let err = AppConfig::from_lookup(lookup_from(&[("BI_ROW_LIMIT", "-3")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
