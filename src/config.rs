//! Configuration for catalog normalization
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (codegov.toml)
//! - Environment variables (CODEGOV__*)
//!
//! ## Example config file (codegov.toml):
//! ```toml
//! [[weights.fields]]
//! field = "name"
//! weight = 1.0
//!
//! [[weights.fields]]
//! field = "contact.email"
//! weight = 1.0
//!
//! [usage]
//! default_code = "0"
//! exempt_code = "3"
//!
//! [[usage.codes]]
//! usage_type = "openSource"
//! code = "1"
//!
//! [redaction]
//! headers = ["x-api-key", "authorization"]
//! private_prefix = "_"
//! ```
//!
//! Tables keyed by field path or usage type are written as arrays of
//! entries so dotted paths and camelCase names survive key normalization.

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::weights::FieldWeights;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Field weight table used for repository scoring
    #[serde(default)]
    pub weights: FieldWeights,

    /// Usage type to usage code lookup
    #[serde(default)]
    pub usage: UsageConfig,

    /// Log redaction settings
    #[serde(default)]
    pub redaction: RedactionConfig,
}

/// Usage code table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageConfig {
    /// Code for any `exempt*` usage type not listed in `codes`
    #[serde(default = "default_exempt_code")]
    pub exempt_code: String,

    /// Code for missing or unknown usage types
    #[serde(default = "default_usage_code")]
    pub default_code: String,

    /// usageType -> single character code
    #[serde(default = "default_usage_codes")]
    pub codes: Vec<UsageCode>,
}

/// One row of the usage code table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCode {
    pub usage_type: String,
    pub code: String,
}

impl UsageConfig {
    /// Exact table lookup for a usage type
    pub fn code_for(&self, usage_type: &str) -> Option<&str> {
        self.codes
            .iter()
            .find(|c| c.usage_type == usage_type)
            .map(|c| c.code.as_str())
    }
}

/// Redaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Header names removed from logged requests and responses (case-insensitive)
    #[serde(default = "default_redacted_headers")]
    pub headers: Vec<String>,

    /// Keys starting with this prefix are internal and never leave the process
    #[serde(default = "default_private_prefix")]
    pub private_prefix: String,
}

// Default value functions
fn default_usage_codes() -> Vec<UsageCode> {
    [("openSource", "1"), ("governmentWideReuse", "2")]
        .into_iter()
        .map(|(usage_type, code)| UsageCode {
            usage_type: usage_type.to_string(),
            code: code.to_string(),
        })
        .collect()
}

fn default_exempt_code() -> String {
    "3".to_string()
}

fn default_usage_code() -> String {
    "0".to_string()
}

fn default_redacted_headers() -> Vec<String> {
    vec!["x-api-key".to_string()]
}

fn default_private_prefix() -> String {
    "_".to_string()
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            exempt_code: default_exempt_code(),
            default_code: default_usage_code(),
            codes: default_usage_codes(),
        }
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            headers: default_redacted_headers(),
            private_prefix: default_private_prefix(),
        }
    }
}

impl NormalizerConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering a specific file over the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["codegov.toml", ".codegov.toml", "config/codegov.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("gov", "code", "codegov") {
            let xdg_config = config_dir.config_dir().join("codegov.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // CODEGOV__USAGE__DEFAULT_CODE=9
        builder = builder.add_source(
            Environment::with_prefix("CODEGOV")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
