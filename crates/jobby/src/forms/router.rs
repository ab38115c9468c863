use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::domain::{LoginForm, RegisterForm, Validation, ValidationError};
use super::rules;
use crate::error::AppError;

/// Router exposing one-shot validation of submitted forms.
pub fn form_router() -> Router {
    Router::new()
        .route("/api/v1/forms/login/validate", post(login_handler))
        .route("/api/v1/forms/register/validate", post(register_handler))
}

/// Login validation as returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct LoginValidationView {
    pub is_valid: bool,
    pub email_error: Option<ValidationError>,
    pub password_error: Option<ValidationError>,
    pub checked_at: DateTime<Utc>,
}

impl From<Validation> for LoginValidationView {
    fn from(validation: Validation) -> Self {
        Self {
            is_valid: validation.is_valid(),
            email_error: validation.email_error(),
            password_error: validation.password_error(),
            checked_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterValidationView {
    pub is_valid: bool,
    pub checked_at: DateTime<Utc>,
}

impl RegisterValidationView {
    pub fn new(is_valid: bool) -> Self {
        Self {
            is_valid,
            checked_at: Utc::now(),
        }
    }
}

pub(crate) async fn login_handler(
    payload: Result<Json<LoginForm>, JsonRejection>,
) -> Result<Json<LoginValidationView>, AppError> {
    let Json(form) = payload?;
    let validation = rules::validate_login_form(&form.email, &form.password);
    debug!(is_valid = validation.is_valid(), "validated login form");

    Ok(Json(LoginValidationView::from(validation)))
}

pub(crate) async fn register_handler(
    payload: Result<Json<RegisterForm>, JsonRejection>,
) -> Result<Json<RegisterValidationView>, AppError> {
    let Json(form) = payload?;
    let is_valid = rules::validate_register_form(&form.name, &form.email, &form.password);
    debug!(is_valid, "validated register form");

    Ok(Json(RegisterValidationView::new(is_valid)))
}
