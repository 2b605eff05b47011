//! Client-side checks run before any auth request is sent.

use regex::Regex;

use super::types::{AccountPatch, LoginBody, RegisterBody};
use crate::error::{ApiError, ValidationErrors};

pub const MIN_PASSWORD_LEN: usize = 6;

const EMAIL_MESSAGE: &str = "enter a valid email";
const PASSWORD_MESSAGE: &str = "at least 6 characters";
const REQUIRED_MESSAGE: &str = "required";

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email.trim()))
}

#[must_use]
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// # Errors
///
/// Returns [`ApiError::Validation`] listing every rejected field.
pub fn validate_login(body: &LoginBody) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::new();
    check_credentials(&mut errors, &body.email, &body.password);
    errors.into_result()
}

/// # Errors
///
/// Returns [`ApiError::Validation`] listing every rejected field.
pub fn validate_register(body: &RegisterBody) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::new();
    check_credentials(&mut errors, &body.email, &body.password);
    if body.first_name.trim().is_empty() {
        errors.push("firstName", REQUIRED_MESSAGE);
    }
    if body.last_name.trim().is_empty() {
        errors.push("lastName", REQUIRED_MESSAGE);
    }
    errors.into_result()
}

/// Present fields must be as valid as at registration; absent fields are skipped.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] listing every rejected field.
pub fn validate_patch(patch: &AccountPatch) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::new();
    if patch.email.as_deref().is_some_and(|email| !valid_email(email)) {
        errors.push("email", EMAIL_MESSAGE);
    }
    if patch.first_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        errors.push("firstName", REQUIRED_MESSAGE);
    }
    if patch.last_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        errors.push("lastName", REQUIRED_MESSAGE);
    }
    errors.into_result()
}

fn check_credentials(errors: &mut ValidationErrors, email: &str, password: &str) {
    if !valid_email(email) {
        errors.push("email", EMAIL_MESSAGE);
    }
    if !valid_password(password) {
        errors.push("password", PASSWORD_MESSAGE);
    }
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
