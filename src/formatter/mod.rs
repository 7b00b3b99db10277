//! Repository record formatting
//!
//! Turns raw catalog records into the canonical shape for their schema
//! family. Dispatch happens once on [`SchemaFamily`]; each family has its
//! own pure formatting function.
//!
//! ```text
//! catalog doc ──► get_code_json_version ──► SchemaFamily
//!      │                                        │
//!      └─► get_code_json_repos ──► raw record ──┴─► format_v1 / format_v2
//!                                                        │
//!                                                        ▼
//!                                              CanonicalRepository
//! ```

pub mod records;

pub use records::{Agency, CanonicalRepository, RepositoryV1, RepositoryV2};

use serde_json::{Map, Value};

use crate::catalog::{get_code_json_repos, get_code_json_version};
use crate::config::UsageConfig;
use crate::dates::{format_date, to_iso_string};
use crate::error::{MetadataError, Result};
use crate::utils::transform_string_to_key;
use crate::version::SchemaFamily;

const V1_DATE_FIELDS: &[&str] = &["metadataLastUpdated", "lastCommit", "sourceCodeLastModified"];
const V2_DATE_FIELDS: &[&str] = &["created", "lastModified", "metadataLastUpdated"];

/// Result of formatting every record in a catalog document
#[derive(Debug)]
pub struct CatalogReport {
    /// Version the document declared or was sniffed as
    pub version: String,
    pub repos: Vec<CanonicalRepository>,
    /// Index into the source list and the reason the record was rejected
    pub failures: Vec<(usize, MetadataError)>,
}

/// Formats raw repository records
#[derive(Debug, Clone, Default)]
pub struct RepoFormatter {
    usage: UsageConfig,
}

impl RepoFormatter {
    pub fn new(usage: UsageConfig) -> Self {
        Self { usage }
    }

    /// Format one raw record for the given schema version.
    ///
    /// Version strings outside the 2.x pattern get 1.x treatment. The input
    /// is never modified. Fails only when the record is not an object or a
    /// date field does not parse.
    pub fn format_repo(&self, schema_version: &str, raw: &Value) -> Result<CanonicalRepository> {
        if !raw.is_object() {
            return Err(MetadataError::InvalidDocument(
                "repository record must be a JSON object".to_string(),
            ));
        }

        let family = SchemaFamily::classify(schema_version);
        let formatted = match family {
            SchemaFamily::V2_0_0 => CanonicalRepository::V2(format_v2(raw)?),
            SchemaFamily::V1_0_0 | SchemaFamily::V1_0_1 => CanonicalRepository::V1(format_v1(raw)?),
        };

        tracing::debug!(
            family = %family,
            repo_id = formatted.repo_id().unwrap_or("-"),
            "formatted repository"
        );
        Ok(formatted)
    }

    /// Format every record in a catalog document.
    ///
    /// A catalog-level `agency` is attached to records that don't carry
    /// their own; a `null` agency counts as missing. Bad records are collected in `failures` instead of
    /// aborting the whole document.
    pub fn format_catalog(&self, doc: &Value) -> Result<CatalogReport> {
        let version = get_code_json_version(doc);
        let repos = get_code_json_repos(doc).ok_or_else(|| {
            MetadataError::InvalidDocument(format!(
                "no {} list for schema version {version}",
                SchemaFamily::classify(&version).repos_key()
            ))
        })?;
        let catalog_agency = doc.get("agency").filter(|a| !a.is_null());

        let mut report = CatalogReport {
            version: version.clone(),
            repos: Vec::with_capacity(repos.len()),
            failures: Vec::new(),
        };

        for (index, raw) in repos.iter().enumerate() {
            let own_agency = raw.get("agency").filter(|a| !a.is_null());
            let result = match (catalog_agency, own_agency) {
                (Some(agency), None) => {
                    let mut with_agency = raw.clone();
                    if let Some(obj) = with_agency.as_object_mut() {
                        obj.insert("agency".to_string(), agency.clone());
                    }
                    self.format_repo(&version, &with_agency)
                }
                _ => self.format_repo(&version, raw),
            };

            match result {
                Ok(repo) => report.repos.push(repo),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping repository record");
                    report.failures.push((index, e));
                }
            }
        }

        Ok(report)
    }

    /// Single character usage classification of a raw record.
    ///
    /// Reads `permissions.usageType` (2.x) or the `openSourceProject` /
    /// `governmentWideReuseProject` flags (1.x). Listed usage types use the
    /// configured code; other `exempt*` types, or a missing usage type with
    /// exemption text, get the exempt code; everything else the default.
    pub fn usage_code(&self, raw: &Value) -> &str {
        match usage_type(raw) {
            Some(usage) => {
                if let Some(code) = self.usage.code_for(&usage) {
                    code
                } else if usage.starts_with("exempt") {
                    &self.usage.exempt_code
                } else {
                    tracing::warn!(usage_type = %usage, "unknown usage type");
                    &self.usage.default_code
                }
            }
            None if has_exemption(raw) => &self.usage.exempt_code,
            None => &self.usage.default_code,
        }
    }
}

/// `<org>_<acronym>_<name>`, each part lowercased and slugged.
///
/// The acronym falls back to the organization. Empty parts are skipped.
/// Without a usable name there is no ID.
pub fn repo_id(organization: Option<&str>, acronym: Option<&str>, name: Option<&str>) -> Option<String> {
    let slug = |s: &str| transform_string_to_key(&s.to_lowercase());
    let name = name.map(slug).filter(|s| !s.is_empty())?;
    let org = organization.map(slug).filter(|s| !s.is_empty());
    let acronym = acronym.map(slug).filter(|s| !s.is_empty()).or_else(|| org.clone());

    let parts: Vec<String> = [org, acronym, Some(name)].into_iter().flatten().collect();
    Some(parts.join("_"))
}

fn format_v2(raw: &Value) -> Result<RepositoryV2> {
    let name = string_field(raw, "name");
    let organization = string_field(raw, "organization");
    let agency = raw.get("agency").and_then(Agency::from_value);
    let repo_id = repo_id(
        organization.as_deref(),
        agency.as_ref().and_then(|a| a.acronym.as_deref()),
        name.as_deref(),
    );

    Ok(RepositoryV2 {
        name,
        description: string_field(raw, "description"),
        permissions: passthrough(raw, "permissions"),
        tags: passthrough(raw, "tags"),
        contact: passthrough(raw, "contact"),
        repository_url: string_field(raw, "repositoryURL"),
        labor_hours: passthrough(raw, "laborHours"),
        organization,
        agency,
        date: format_date_block(raw, "date", V2_DATE_FIELDS)?,
        repo_id,
    })
}

fn format_v1(raw: &Value) -> Result<RepositoryV1> {
    let name = string_field(raw, "name");
    let organization = string_field(raw, "organization");
    let agency = raw.get("agency").and_then(Agency::from_value);
    let repo_id = repo_id(
        organization.as_deref(),
        agency.as_ref().and_then(|a| a.acronym.as_deref()),
        name.as_deref(),
    );

    Ok(RepositoryV1 {
        name,
        description: string_field(raw, "description"),
        license: passthrough(raw, "license"),
        open_source_project: passthrough(raw, "openSourceProject"),
        government_wide_reuse_project: passthrough(raw, "governmentWideReuseProject"),
        exemption: passthrough(raw, "exemption"),
        exemption_text: passthrough(raw, "exemptionText"),
        tags: passthrough(raw, "tags"),
        contact: passthrough(raw, "contact"),
        repository: string_field(raw, "repository"),
        homepage: string_field(raw, "homepage"),
        organization,
        agency,
        updated: format_date_block(raw, "updated", V1_DATE_FIELDS)?,
        repo_id,
    })
}

/// Validate the date entries of `raw[key]` and re-emit them as ISO strings.
///
/// Missing block or missing/blank entries are skipped; a present entry that
/// does not parse is an error naming the field.
fn format_date_block(raw: &Value, key: &str, fields: &[&str]) -> Result<Value> {
    let block = match raw.get(key) {
        None | Some(Value::Null) => return Ok(Value::Null),
        Some(Value::Object(block)) => block,
        Some(other) => {
            return Err(MetadataError::InvalidDateField {
                field: key.to_string(),
                value: other.to_string(),
            })
        }
    };

    let mut out = Map::new();
    for field in fields {
        let text = match block.get(*field) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.trim().is_empty() => continue,
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(MetadataError::InvalidDateField {
                    field: format!("{key}.{field}"),
                    value: other.to_string(),
                })
            }
        };
        let parsed = format_date(Some(text.as_str())).map_err(|_| MetadataError::InvalidDateField {
            field: format!("{key}.{field}"),
            value: text.clone(),
        })?;
        out.insert((*field).to_string(), Value::String(to_iso_string(&parsed)));
    }
    Ok(Value::Object(out))
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            tracing::warn!(field = key, value = %other, "dropping non-string value");
            None
        }
    }
}

fn passthrough(raw: &Value, key: &str) -> Value {
    raw.get(key).cloned().unwrap_or(Value::Null)
}

fn usage_type(raw: &Value) -> Option<String> {
    let declared = raw
        .pointer("/permissions/usageType")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if let Some(usage) = declared {
        return Some(usage.to_string());
    }

    if flag_set(raw.get("openSourceProject")) {
        Some("openSource".to_string())
    } else if flag_set(raw.get("governmentWideReuseProject")) {
        Some("governmentWideReuse".to_string())
    } else {
        None
    }
}

/// 1.x flags show up as 1, true, or "1" depending on the agency.
fn flag_set(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim() == "1" || s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn has_exemption(raw: &Value) -> bool {
    let filled = |v: Option<&Value>| v.is_some_and(|v| !crate::utils::is_blank(v));
    filled(raw.pointer("/permissions/exemptionText"))
        || filled(raw.get("exemptionText"))
        || filled(raw.get("exemption"))
}
