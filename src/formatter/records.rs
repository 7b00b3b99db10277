//! Canonical repository record types
//!
//! Field order in these structs is the serialization order and matches
//! [`SchemaFamily::canonical_fields`](crate::version::SchemaFamily::canonical_fields).
//! Every field is always serialized; absent values come out as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Agency block carried on a repository record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(rename = "codeUrl", default, skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_file: Option<String>,
    /// Compliance dimension -> score in 0..=1, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Map<String, Value>>,
    #[serde(rename = "complianceDashboard", default, skip_serializing_if = "Option::is_none")]
    pub compliance_dashboard: Option<bool>,
}

impl Agency {
    /// Lenient extraction from a raw agency value.
    ///
    /// Objects keep the known keys and drop the rest. A bare string (the
    /// 1.0.1 catalog form, `"agency": "GSA"`) is taken as the acronym.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(acronym) if !acronym.trim().is_empty() => Some(Self {
                acronym: Some(acronym.trim().to_string()),
                ..Self::default()
            }),
            Value::Object(obj) => {
                let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
                Some(Self {
                    name: text("name"),
                    acronym: text("acronym"),
                    website: text("website"),
                    code_url: text("codeUrl"),
                    fallback_file: text("fallback_file"),
                    requirements: obj.get("requirements").and_then(Value::as_object).cloned(),
                    compliance_dashboard: obj.get("complianceDashboard").and_then(Value::as_bool),
                })
            }
            _ => None,
        }
    }
}

/// Canonical record for the 1.x schema family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryV1 {
    pub name: Option<String>,
    pub description: Option<String>,
    pub license: Value,
    pub open_source_project: Value,
    pub government_wide_reuse_project: Value,
    pub exemption: Value,
    pub exemption_text: Value,
    pub tags: Value,
    pub contact: Value,
    pub repository: Option<String>,
    pub homepage: Option<String>,
    pub organization: Option<String>,
    pub agency: Option<Agency>,
    /// Validated `metadataLastUpdated` / `lastCommit` / `sourceCodeLastModified`
    pub updated: Value,
    #[serde(rename = "repoID")]
    pub repo_id: Option<String>,
}

/// Canonical record for the 2.x schema family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryV2 {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Value,
    pub tags: Value,
    pub contact: Value,
    #[serde(rename = "repositoryURL")]
    pub repository_url: Option<String>,
    pub labor_hours: Value,
    pub organization: Option<String>,
    pub agency: Option<Agency>,
    /// Validated `created` / `lastModified` / `metadataLastUpdated`
    pub date: Value,
    #[serde(rename = "repoID")]
    pub repo_id: Option<String>,
}

/// A formatted record of either family
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalRepository {
    V1(RepositoryV1),
    V2(RepositoryV2),
}

impl CanonicalRepository {
    pub fn repo_id(&self) -> Option<&str> {
        match self {
            CanonicalRepository::V1(r) => r.repo_id.as_deref(),
            CanonicalRepository::V2(r) => r.repo_id.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CanonicalRepository::V1(r) => r.name.as_deref(),
            CanonicalRepository::V2(r) => r.name.as_deref(),
        }
    }

    pub fn agency(&self) -> Option<&Agency> {
        match self {
            CanonicalRepository::V1(r) => r.agency.as_ref(),
            CanonicalRepository::V2(r) => r.agency.as_ref(),
        }
    }

    pub fn is_v2(&self) -> bool {
        matches!(self, CanonicalRepository::V2(_))
    }

    /// Convert into a plain JSON value
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
