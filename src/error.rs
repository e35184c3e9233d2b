//! Error types for configuration resolution and validation.

use thiserror::Error;

/// Errors returned while resolving or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config file failed.
    #[error("failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing a config file failed.
    #[error("failed to parse config file: {0}")]
    ParseFailed(serde_json::Error),
    /// Re-encoding the merged config into the target type failed.
    #[error("failed to decode config: {0}")]
    DecodeFailed(serde_json::Error),
    /// The working directory could not be determined during env file discovery.
    #[error("failed to load environment variables: {0}")]
    EnvDiscovery(std::io::Error),
    /// An environment value does not parse as the field's type.
    #[error("invalid value {value:?} for {var}: {reason}")]
    Coercion {
        /// Full environment-variable name, prefix included.
        var: String,
        /// Raw value that failed to parse.
        value: String,
        /// Parse failure description.
        reason: String,
    },
    /// Error raised while resolving a nested sub-config field.
    #[error("error loading sub config field {field}: {source}")]
    Field {
        /// Name of the nesting field.
        field: &'static str,
        /// Underlying error from the nested record.
        #[source]
        source: Box<ConfigError>,
    },
    /// A specific field failed validation.
    #[error("invalid config at {path}: {message}")]
    InvalidField {
        /// Dotted path of the offending field.
        path: String,
        /// Why the value was rejected.
        message: String,
    },
    /// Generic validation failure.
    #[error("invalid config: {0}")]
    Invalid(String),
}
