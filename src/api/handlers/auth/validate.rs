//! Field validation for signup and login payloads.
//!
//! Checks run in field order and collect every failure instead of stopping
//! at the first, so the caller can render all errors at once.

use regex::Regex;

use super::types::{FieldError, LoginRequest, SignupRequest};

/// Normalize an email for lookup/uniqueness checks.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic `local@domain.tld` shape check.
pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Password policy: at least 8 characters with one lowercase letter, one
/// uppercase letter, and one digit.
pub(crate) fn valid_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub(crate) fn validate_signup(request: &SignupRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let name = request.name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Full name is required"));
    } else if name.chars().count() < 2 {
        errors.push(FieldError::new(
            "name",
            "Full name must be at least 2 characters",
        ));
    }

    let email = request.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !valid_email(email) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address",
        ));
    }

    if request.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if !valid_password(&request.password) {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters with uppercase, lowercase, and number",
        ));
    }

    if request.confirm_password.is_empty() {
        errors.push(FieldError::new(
            "confirmPassword",
            "Please confirm your password",
        ));
    } else if request.password != request.confirm_password {
        errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
    }

    errors
}

pub(crate) fn validate_login(request: &LoginRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let email = request.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !valid_email(email) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address",
        ));
    }

    // Complexity is not re-checked at login; presence is enough.
    if request.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    errors
}
