//! String and JSON tree helpers
//!
//! Slug generation for repository IDs, deep key omission used by the log
//! serializers, and a couple of small collection helpers.

use serde_json::Value;

/// Stop words removed from slugs, first occurrence only.
const STOP_WORDS: [&str; 3] = ["and_", "of_", "the_"];

/// Turn free text into an ASCII, lowercase, underscore-joined key.
///
/// Text is transliterated to ASCII first, so `"Café"` becomes `"cafe"` and
/// `"Straße"` becomes `"strasse"`. Runs of characters other than `[a-z0-9 ]`
/// become a single space, whitespace is collapsed, and spaces become
/// underscores. Finally the first occurrence of each of `and_`, `of_` and
/// `the_` is removed. The removal is a literal substring match.
pub fn transform_string_to_key(input: &str) -> String {
    let lowered = deunicode::deunicode(input).to_ascii_lowercase();

    let mut spaced = String::with_capacity(lowered.len());
    let mut in_gap = false;
    for ch in lowered.chars() {
        let keep = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        if keep {
            spaced.push(ch);
            in_gap = false;
        } else if !in_gap {
            spaced.push(' ');
            in_gap = true;
        }
    }

    let mut key = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    for word in STOP_WORDS {
        if let Some(pos) = key.find(word) {
            key.replace_range(pos..pos + word.len(), "");
        }
    }
    key
}

/// Clone `value` and delete every occurrence of the given keys at any depth.
pub fn omit_deep_keys<S: AsRef<str>>(value: &Value, keys: &[S]) -> Value {
    let mut cloned = value.clone();
    retain_keys(&mut cloned, &|key: &str| !keys.iter().any(|k| k.as_ref() == key));
    cloned
}

/// Clone `value` and delete every key starting with `prefix` at any depth.
pub fn omit_private_keys(value: &Value, prefix: &str) -> Value {
    let mut cloned = value.clone();
    if prefix.is_empty() {
        return cloned;
    }
    retain_keys(&mut cloned, &|key: &str| !key.starts_with(prefix));
    cloned
}

fn retain_keys(value: &mut Value, keep: &dyn Fn(&str) -> bool) {
    match value {
        Value::Object(map) => {
            map.retain(|k, _| keep(k));
            for child in map.values_mut() {
                retain_keys(child, keep);
            }
        }
        Value::Array(items) => {
            for item in items {
                retain_keys(item, keep);
            }
        }
        _ => {}
    }
}

/// Elements of `items` that have no structurally equal counterpart in `existing`.
pub fn remove_dupes<T: PartialEq + Clone>(items: &[T], existing: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| !existing.contains(item))
        .cloned()
        .collect()
}

/// Remove a leading byte-order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Resolve a dotted path (`"contact.email"`) inside a JSON value.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
}

/// True when a value carries no information: null, "", [] or {}.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}
