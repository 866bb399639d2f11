//! Request validation. Every check that fails is reported, not just the first one.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ApiError, ApiResult, ERR_PWD_CONFIRM, FieldError};
use crate::model::{Language, LanguageResource, RegisterRequest};
use crate::rights;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub fn is_email(value: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(value))
}

pub fn validate_register(req: &RegisterRequest) -> ApiResult<()> {
    let mut errors = Vec::new();

    if req.email.trim().is_empty() {
        errors.push(FieldError::new("email", "email is required"));
    } else if !is_email(&req.email) {
        errors.push(FieldError::new("email", "email is not valid"));
    }
    if req.password.chars().count() < 8 {
        errors.push(FieldError::new(
            "password",
            "password must be at least 8 characters",
        ));
    }
    if req.password_confirm != req.password {
        errors.push(FieldError::new("passwordConfirm", ERR_PWD_CONFIRM));
    }
    match req.civility {
        Some(0..=2) => {}
        Some(_) => errors.push(FieldError::new("civility", "civility must be 0, 1 or 2")),
        None => errors.push(FieldError::new("civility", "civility is required")),
    }
    if req.firstname.trim().is_empty() {
        errors.push(FieldError::new("firstname", "firstname is required"));
    }
    if req.lastname.trim().is_empty() {
        errors.push(FieldError::new("lastname", "lastname is required"));
    }

    finish(errors)
}

pub fn validate_language(language: &Language) -> ApiResult<()> {
    let mut errors = Vec::new();

    if language.name.chars().count() < 5 {
        errors.push(FieldError::new("name", "name must be at least 5 characters"));
    }
    if language.flag.trim().is_empty() {
        errors.push(FieldError::new("flag", "flag is required"));
    }
    let culture_len = language.culture.chars().count();
    if !(2..=5).contains(&culture_len) {
        errors.push(FieldError::new(
            "culture",
            "culture must be between 2 and 5 characters",
        ));
    }

    finish(errors)
}

pub fn validate_resource(resource: &LanguageResource) -> ApiResult<()> {
    let key_len = resource.key.chars().count();
    if !(2..=50).contains(&key_len) {
        return finish(vec![FieldError::new(
            "key",
            "key must be between 2 and 50 characters",
        )]);
    }
    Ok(())
}

pub fn validate_rights(codes: &[String]) -> ApiResult<()> {
    let errors: Vec<FieldError> = codes
        .iter()
        .filter(|c| !rights::is_known(c))
        .map(|c| FieldError::new("rights", format!("unknown right {}", c)))
        .collect();
    finish(errors)
}

fn finish(errors: Vec<FieldError>) -> ApiResult<()> {
    if errors.is_empty() {
        return Ok(());
    }
    Err(ApiError::invalid(errors))
}

#[cfg(test)]
#[path = "tests/validators_tests.rs"]
mod tests;
