//! Weighted field scoring
//!
//! A repository's score is the sum of the weights of the metadata fields it
//! actually fills in. The weight table is plain configuration; see
//! [`crate::config::NormalizerConfig`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::{is_blank, lookup_path};

/// One row of the weight table. `field` is a dotted path into a raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWeight {
    pub field: String,
    pub weight: f64,
}

/// Immutable field weight table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    #[serde(default = "default_field_weights")]
    pub fields: Vec<FieldWeight>,
}

/// Score of a single record against a weight table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepositoryScore {
    pub score: f64,
    pub max: f64,
}

impl RepositoryScore {
    /// Score as a fraction of the maximum, 0.0 when the table is empty
    pub fn ratio(&self) -> f64 {
        if self.max > 0.0 {
            self.score / self.max
        } else {
            0.0
        }
    }
}

fn default_field_weights() -> Vec<FieldWeight> {
    [
        ("name", 1.0),
        ("description", 1.0),
        ("repositoryURL", 1.0),
        ("permissions.licenses", 1.0),
        ("permissions.usageType", 1.0),
        ("contact.email", 1.0),
        ("tags", 0.8),
        ("laborHours", 0.8),
        ("organization", 0.6),
        ("homepageURL", 0.5),
        ("languages", 0.5),
        ("status", 0.4),
        ("vcs", 0.4),
        ("contact.name", 0.3),
        ("version", 0.3),
        ("date.created", 0.3),
        ("date.lastModified", 0.3),
        ("date.metadataLastUpdated", 0.3),
        ("downloadURL", 0.2),
        ("disclaimerURL", 0.2),
        ("partners", 0.2),
        ("relatedCode", 0.2),
        ("reusedCode", 0.2),
    ]
    .into_iter()
    .map(|(field, weight)| FieldWeight {
        field: field.to_string(),
        weight,
    })
    .collect()
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            fields: default_field_weights(),
        }
    }
}

impl FieldWeights {
    pub fn new(fields: Vec<FieldWeight>) -> Self {
        Self { fields }
    }

    /// Weight of `field`, 0.0 when the table does not list it
    pub fn get_field_weight(&self, field: &str) -> f64 {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.weight)
            .unwrap_or(0.0)
    }

    /// Sum of every weight in the table
    pub fn get_max_total_weight(&self) -> f64 {
        self.fields.iter().map(|f| f.weight).sum()
    }

    /// Add `value * weight(field)` to the `score` already on `target`.
    ///
    /// A target without a numeric `score` starts from zero.
    pub fn get_score(&self, target: &Value, field: &str, value: f64) -> f64 {
        let increment = value * self.get_field_weight(field);
        match target.get("score").and_then(Value::as_f64) {
            Some(existing) => existing + increment,
            None => increment,
        }
    }

    /// Score a raw record: every non-blank weighted field contributes its weight.
    pub fn score_repository(&self, record: &Value) -> RepositoryScore {
        let mut target = serde_json::json!({});
        for entry in &self.fields {
            let filled = lookup_path(record, &entry.field).is_some_and(|v| !is_blank(v));
            if filled {
                target["score"] = Value::from(self.get_score(&target, &entry.field, 1.0));
            }
        }

        RepositoryScore {
            score: target.get("score").and_then(Value::as_f64).unwrap_or(0.0),
            max: self.get_max_total_weight(),
        }
    }
}
