//! code.json Metadata Normalization
//!
//! Converts repository records from agency `code.json` catalogs, in any of
//! the historical schema versions, into one canonical shape per schema
//! family, plus the string, URL and date helpers the harvesting pipeline
//! leans on.
//!
//! ## Features
//!
//! - **Version Dispatch**: explicit or sniffed schema version mapped to a [`SchemaFamily`]
//! - **Canonical Records**: exact key sets, derived `repoID`, validated dates
//! - **Mapping Flattening**: search mappings flattened by path or by type
//! - **Redaction**: deep key omission and request/response log serializers
//! - **Scoring**: configurable per-field weights and usage codes
//!
//! ## Schema families
//!
//! ```text
//! 1.0.0   { "projects": [...] }
//! 1.0.1   { "agency": "GSA", "projects": [...] }
//! 2.0.0   { "version": "2.0.0", "agency": {...}, "releases": [...] }
//! ```

pub mod catalog;
pub mod config;
pub mod dates;
pub mod error;
pub mod formatter;
pub mod github;
pub mod mapping;
pub mod serializers;
pub mod utils;
pub mod validate;
pub mod version;
pub mod weights;

pub use catalog::{get_code_json_repos, get_code_json_version, parse_catalog};
pub use config::NormalizerConfig;
pub use dates::{format_date, is_last_day_of_month};
pub use error::{MetadataError, Result};
pub use formatter::{CanonicalRepository, RepoFormatter};
pub use github::{is_valid_repository_url, parse_github_url, GithubRepo};
pub use mapping::{get_flattened_mapping_properties, get_flattened_mapping_properties_by_type};
pub use serializers::LogSerializers;
pub use utils::{omit_deep_keys, omit_private_keys, remove_dupes, strip_bom, transform_string_to_key};
pub use validate::{is_valid_email, is_valid_url};
pub use version::SchemaFamily;
pub use weights::{FieldWeights, RepositoryScore};
