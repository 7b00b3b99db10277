//! Error types for catalog normalization

use thiserror::Error;

/// Result type for normalization operations
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Normalization errors
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Missing date value")]
    MissingDate,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date in field {field}: {value}")]
    InvalidDateField { field: String, value: String },

    #[error("Invalid catalog document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
