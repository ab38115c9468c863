use std::sync::LazyLock;

use regex::Regex;

use super::domain::{Validation, ValidationError};

/// Minimum password length, counted in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Permissive email shape: local part, `@`, a domain label and at least one
/// dotted label. Anchored so partial matches are rejected.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9+._%\-]{1,256}",
        r"@",
        r"[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}",
        r"(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    ))
    .expect("email pattern compiles")
});

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_name(name: &str) -> bool {
    !is_blank(name)
}

pub fn is_valid_email(email: &str) -> bool {
    !is_blank(email) && is_email(email)
}

pub fn is_valid_password(password: &str) -> bool {
    !is_blank(password) && password.encode_utf16().count() >= MIN_PASSWORD_LEN
}

/// Per-field check used by the login screen.
pub fn validate_login_form(email: &str, password: &str) -> Validation {
    let email_error = (!is_valid_email(email)).then_some(ValidationError::InvalidEmail);
    let password_error = (!is_valid_password(password)).then_some(ValidationError::InvalidPassword);

    Validation::new(email_error, password_error)
}

/// Single pass/fail check used by the registration screen.
pub fn validate_register_form(name: &str, email: &str, password: &str) -> bool {
    is_valid_name(name) && is_valid_email(email) && is_valid_password(password)
}
