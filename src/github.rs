//! GitHub repository URL helpers

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Host prefixes stripped by [`parse_github_url`]. Longer forms first so
/// `git@github.com:/` wins over `git@github.com:`.
const GITHUB_PREFIXES: [&str; 5] = [
    "https://github.com/",
    "http://github.com/",
    "git://github.com/",
    "git@github.com:/",
    "git@github.com:",
];

static GITHUB_REPOSITORY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://github\.com/|git://github\.com/|git@github\.com:/?)[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?/[A-Za-z0-9_.-]+?(?:\.git)?/?$",
    )
    .unwrap()
});

/// Owner and repository name extracted from a GitHub URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GithubRepo {
    pub owner: String,
    pub repo: String,
}

impl GithubRepo {
    /// Canonical https URL for this repository
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for GithubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Split a GitHub URL into owner and repository.
///
/// Trailing `/` and `.git` are stripped, then the first recognized host
/// prefix. Only the first two remaining path segments are used, so
/// `https://github.com/GSA/code-gov/tree/master` parses as `GSA/code-gov`.
/// Returns `None` when fewer than two non-empty segments remain.
pub fn parse_github_url(url: &str) -> Option<GithubRepo> {
    let mut rest = url.trim();
    rest = rest.strip_suffix('/').unwrap_or(rest);
    rest = rest.strip_suffix(".git").unwrap_or(rest);
    for prefix in GITHUB_PREFIXES {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
            break;
        }
    }

    let mut segments = rest.split('/');
    let owner = segments.next().filter(|s| !s.is_empty())?;
    let repo = segments.next().filter(|s| !s.is_empty())?;
    Some(GithubRepo {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

/// True iff `url` is exactly a GitHub repository URL (no extra path).
pub fn is_valid_repository_url(url: &str) -> bool {
    GITHUB_REPOSITORY_URL.is_match(url)
}
