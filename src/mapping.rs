//! Search mapping flattening
//!
//! Elasticsearch style mappings nest field definitions under `properties`
//! blocks. The harvester needs them flat: either dotted path -> type, or
//! type -> list of dotted paths (used to build per-type query clauses).
//!
//! Traversal rules, checked in order at each object node:
//! 1. `properties` present: the node is a container. If its own `type` is
//!    `"nested"` the node path is recorded under `nested`, then the walk
//!    continues into `properties` without adding a path segment.
//! 2. `type` present: leaf, recorded at the current path.
//! 3. otherwise every object-valued key is a child path segment.

use serde_json::Value;
use std::collections::BTreeMap;

/// Type name that marks an independently addressable sub-document.
pub const NESTED_TYPE: &str = "nested";

/// Flatten a mapping into `dotted.path -> type`.
pub fn get_flattened_mapping_properties(mapping: &Value) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();
    walk(mapping, &mut Vec::new(), &mut |path: String, ty: &str| {
        flat.insert(path, ty.to_string());
    });
    flat
}

/// Flatten a mapping into `type -> [dotted.path, ...]`, paths in document order.
///
/// A `nested` node appears under the `nested` bucket and its children also
/// appear under their own types.
pub fn get_flattened_mapping_properties_by_type(mapping: &Value) -> BTreeMap<String, Vec<String>> {
    let mut by_type: BTreeMap<String, Vec<String>> = BTreeMap::new();
    walk(mapping, &mut Vec::new(), &mut |path: String, ty: &str| {
        by_type.entry(ty.to_string()).or_default().push(path);
    });
    by_type
}

fn walk<'a>(node: &'a Value, path: &mut Vec<&'a str>, record: &mut dyn FnMut(String, &'a str)) {
    let Some(obj) = node.as_object() else {
        return;
    };

    let node_type = obj.get("type").and_then(Value::as_str);

    if let Some(properties) = obj.get("properties") {
        if node_type == Some(NESTED_TYPE) {
            record(path.join("."), NESTED_TYPE);
        }
        walk(properties, path, record);
        return;
    }

    if let Some(ty) = node_type {
        record(path.join("."), ty);
        return;
    }

    for (key, child) in obj {
        if !child.is_object() {
            continue;
        }
        path.push(key.as_str());
        walk(child, path, record);
        path.pop();
    }
}
