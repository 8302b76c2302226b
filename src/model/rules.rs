//! Shared field rules for form validation.

use regex::Regex;
use std::sync::OnceLock;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .expect("valid regex")
    })
}

fn currency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("valid regex"))
}

fn prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9-]+$").expect("valid regex"))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s/?#]+\S*$").expect("valid regex")
    })
}

pub(crate) fn is_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Three uppercase ASCII letters, e.g. `USD`.
pub fn is_currency_code(value: &str) -> bool {
    currency_pattern().is_match(value)
}

pub(crate) fn is_invoice_prefix(value: &str) -> bool {
    prefix_pattern().is_match(value)
}

pub(crate) fn is_url(value: &str) -> bool {
    url_pattern().is_match(value)
}
