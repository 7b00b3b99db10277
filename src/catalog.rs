//! Catalog document inspection
//!
//! A code.json document either states its version or has to be sniffed
//! from its shape.

use serde_json::Value;

use crate::error::{MetadataError, Result};
use crate::utils::strip_bom;
use crate::version::SchemaFamily;

/// Parse catalog text, tolerating a leading byte-order mark.
pub fn parse_catalog(text: &str) -> Result<Value> {
    let doc: Value = serde_json::from_str(strip_bom(text))?;
    if !doc.is_object() {
        return Err(MetadataError::InvalidDocument(
            "catalog root must be a JSON object".to_string(),
        ));
    }
    Ok(doc)
}

/// The schema version a catalog document follows.
///
/// An explicit string `version` wins; any other `version` value is
/// ignored with a warning. Otherwise `agency` + `projects` is
/// 1.0.1, `agency` + `releases` is 2.0.0, and anything else is 1.0.0.
pub fn get_code_json_version(doc: &Value) -> String {
    match doc.get("version") {
        Some(Value::String(version)) => return version.clone(),
        None | Some(Value::Null) => {}
        Some(other) => {
            tracing::warn!(version = %other, "non-string schema version, sniffing document shape");
        }
    }
    sniff_family(doc).as_str().to_string()
}

fn sniff_family(doc: &Value) -> SchemaFamily {
    let has = |key: &str| doc.get(key).is_some_and(|v| !v.is_null());
    if has("agency") && has("projects") {
        SchemaFamily::V1_0_1
    } else if has("agency") && has("releases") {
        SchemaFamily::V2_0_0
    } else {
        SchemaFamily::V1_0_0
    }
}

/// Family of a catalog document, explicit or sniffed
pub fn get_code_json_family(doc: &Value) -> SchemaFamily {
    SchemaFamily::classify(&get_code_json_version(doc))
}

/// Repository records of a catalog: `releases` for 2.x, `projects` otherwise.
///
/// `None` when the list is absent or not an array.
pub fn get_code_json_repos(doc: &Value) -> Option<&Vec<Value>> {
    let family = get_code_json_family(doc);
    doc.get(family.repos_key()).and_then(Value::as_array)
}
