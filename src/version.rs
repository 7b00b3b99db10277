//! Schema version classification
//!
//! code.json documents come in three historical shapes. Everything that
//! branches on the schema version goes through [`SchemaFamily`] so the
//! dispatch lives in one place.

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::error::Result;

/// Matches "2", "2.0", "2.0.0", "2.1" ... but not "2.0.0.1" or "v2".
static V2_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^2(\.\d+){0,2}$").unwrap());

/// The known code.json schema shapes
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaFamily {
    /// Bare `projects` list, no agency block
    #[serde(rename = "1.0.0")]
    V1_0_0,
    /// `agency` + `projects`
    #[serde(rename = "1.0.1")]
    V1_0_1,
    /// `agency` + `releases`, permissions/date blocks
    #[serde(rename = "2.0.0")]
    V2_0_0,
}

/// Canonical output keys for 1.x records, in serialization order
const V1_FIELDS: &[&str] = &[
    "name",
    "description",
    "license",
    "openSourceProject",
    "governmentWideReuseProject",
    "exemption",
    "exemptionText",
    "tags",
    "contact",
    "repository",
    "homepage",
    "organization",
    "agency",
    "updated",
    "repoID",
];

/// Canonical output keys for 2.x records, in serialization order
const V2_FIELDS: &[&str] = &[
    "name",
    "description",
    "permissions",
    "tags",
    "contact",
    "repositoryURL",
    "laborHours",
    "organization",
    "agency",
    "date",
    "repoID",
];

impl SchemaFamily {
    /// Classify a version string.
    ///
    /// Anything matching `^2(\.\d+){0,2}$` is 2.x. Every other string,
    /// including garbage, is treated as 1.x; parseable 1.x versions at or
    /// above 1.0.1 map to [`SchemaFamily::V1_0_1`].
    pub fn classify(version: &str) -> Self {
        let version = version.trim();
        if V2_FAMILY.is_match(version) {
            return SchemaFamily::V2_0_0;
        }

        match parse_version(version) {
            Ok(v) if v.major == 1 && (v.minor > 0 || v.patch >= 1) => SchemaFamily::V1_0_1,
            Ok(v) if v.major == 1 => SchemaFamily::V1_0_0,
            Ok(v) => {
                tracing::warn!(version = %v, "schema version outside the 1.x and 2.x patterns, using 1.x rules");
                SchemaFamily::V1_0_0
            }
            Err(e) => {
                tracing::warn!(version, error = %e, "unparseable schema version, using 1.x rules");
                SchemaFamily::V1_0_0
            }
        }
    }

    /// Get the version string (e.g., "2.0.0")
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFamily::V1_0_0 => "1.0.0",
            SchemaFamily::V1_0_1 => "1.0.1",
            SchemaFamily::V2_0_0 => "2.0.0",
        }
    }

    pub fn is_v2(&self) -> bool {
        matches!(self, SchemaFamily::V2_0_0)
    }

    /// Key holding the repository list in a catalog document
    pub fn repos_key(&self) -> &'static str {
        if self.is_v2() {
            "releases"
        } else {
            "projects"
        }
    }

    /// The exact key set a formatted record of this family carries
    pub fn canonical_fields(&self) -> &'static [&'static str] {
        if self.is_v2() {
            V2_FIELDS
        } else {
            V1_FIELDS
        }
    }
}

impl fmt::Display for SchemaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a possibly abbreviated version string ("2", "v1.0") into semver.
pub fn parse_version(version_str: &str) -> Result<Version> {
    let version_str = version_str.strip_prefix('v').unwrap_or(version_str);
    let padded = match version_str.matches('.').count() {
        0 => format!("{version_str}.0.0"),
        1 => format!("{version_str}.0"),
        _ => version_str.to_string(),
    };
    Ok(Version::parse(&padded)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;

    #[test]
    fn test_v2_family_variants() {
        for v in ["2", "2.0", "2.0.0", "2.1.3", " 2.0.0 "] {
            assert_eq!(SchemaFamily::classify(v), SchemaFamily::V2_0_0, "{v}");
        }
    }

    #[test]
    fn test_v1_family_variants() {
        assert_eq!(SchemaFamily::classify("1.0.0"), SchemaFamily::V1_0_0);
        assert_eq!(SchemaFamily::classify("1"), SchemaFamily::V1_0_0);
        assert_eq!(SchemaFamily::classify("1.0.1"), SchemaFamily::V1_0_1);
        assert_eq!(SchemaFamily::classify("v1.0.1"), SchemaFamily::V1_0_1);
    }

    #[test]
    fn test_unrecognized_versions_fall_back_to_v1() {
        assert_eq!(SchemaFamily::classify(""), SchemaFamily::V1_0_0);
        assert_eq!(SchemaFamily::classify("2.0.0.1"), SchemaFamily::V1_0_0);
        assert_eq!(SchemaFamily::classify("banana"), SchemaFamily::V1_0_0);
        assert_eq!(SchemaFamily::classify("3.0.0"), SchemaFamily::V1_0_0);
    }

    #[test]
    fn test_parse_version_padding() {
        assert_eq!(parse_version("2").unwrap(), Version::new(2, 0, 0));
        assert_eq!(parse_version("v1.0").unwrap(), Version::new(1, 0, 0));
        assert!(matches!(parse_version("x.y"), Err(MetadataError::Semver(_))));
    }

    #[test]
    fn test_repos_key() {
        assert_eq!(SchemaFamily::V2_0_0.repos_key(), "releases");
        assert_eq!(SchemaFamily::V1_0_1.repos_key(), "projects");
    }

    #[test]
    fn test_serde_uses_version_strings() {
        let json = serde_json::to_string(&SchemaFamily::V1_0_1).unwrap();
        assert_eq!(json, "\"1.0.1\"");
        let back: SchemaFamily = serde_json::from_str("\"2.0.0\"").unwrap();
        assert_eq!(back, SchemaFamily::V2_0_0);
    }
}
