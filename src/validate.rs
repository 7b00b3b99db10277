//! Structural email and URL checks
//!
//! These only look at shape. Nothing here resolves hosts or sends mail.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .unwrap()
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:https?|ftp)://(?:[^\s:@/]+(?::[^\s@/]*)?@)?(?:localhost|(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}|\d{1,3}(?:\.\d{1,3}){3})(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .unwrap()
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// http(s)/ftp URL with a dotted host name, `localhost`, or an IPv4 address.
pub fn is_valid_url(url: &str) -> bool {
    URL.is_match(url)
}
