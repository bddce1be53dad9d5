//! Attest Auth: Credential Format Validation
//!
//! A single pure check over an (identifier, secret) pair for login forms.
//! All four rules run unconditionally and accumulate their violations:
//! callers get every problem in one pass, not just the first.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// local@domain.tld shape: non-empty local part, one `@`, dotted domain,
    /// no whitespace anywhere
    static ref EMAIL_FORMAT: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Symbols accepted for the special-character rule.
const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

const MIN_SECRET_LENGTH: usize = 8;

/// Outcome of a credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validate an identifier/secret pair.
///
/// Rules, each contributing exactly one message when violated:
///
/// 1. identifier must be a well-formed email address
/// 2. secret must be at least 8 characters
/// 3. secret must contain at least one digit
/// 4. secret must contain at least one special character
pub fn validate_credentials(identifier: &str, secret: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if !EMAIL_FORMAT.is_match(identifier) {
        errors.push("Invalid email format".to_string());
    }

    if secret.chars().count() < MIN_SECRET_LENGTH {
        errors.push("Password must be at least 8 characters long".to_string());
    }

    if !secret.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit".to_string());
    }

    if !secret.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        errors.push("Password must contain at least one special character".to_string());
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}
