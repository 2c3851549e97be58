//! # Input Validation
//!
//! Shape checks applied to request bodies before they reach storage.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Deliberately loose: a prefix match with no end anchor, not RFC 5322.
const EMAIL_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+";

/// Compiled once from a constant; `test_email_pattern_compiles` guards it.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

/// `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least [`MIN_PASSWORD_LENGTH`] characters
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern_compiles() {
        assert!(Regex::new(EMAIL_PATTERN).is_ok());
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("nodomain"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_check_is_prefix_only() {
        // Anything after a well-formed prefix is accepted.
        assert!(is_valid_email("a@b.c@d"));
        assert!(is_valid_email("a b@c d.e f"));
    }

    #[test]
    fn test_password_length_boundary() {
        assert!(!is_valid_password("abcde"));
        assert!(is_valid_password("abcdef"));
        assert!(!is_valid_password(""));
    }

    #[test]
    fn test_password_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert!(!is_valid_password("ééééé"));
        assert!(is_valid_password("éééééé"));
    }
}
