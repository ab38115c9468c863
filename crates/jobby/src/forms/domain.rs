use serde::{Deserialize, Serialize, Serializer};
use tokio::time::Instant;

/// Input fields tracked by the login and registration screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "password" => Some(Self::Password),
            _ => None,
        }
    }
}

/// Current content of one input field, stamped when it changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub field: Field,
    pub value: String,
    pub changed_at: Instant,
}

impl FieldValue {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            changed_at: Instant::now(),
        }
    }
}

/// Per-field failure reported by the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationError {
    #[error("Unvalid Email")]
    InvalidEmail,
    #[error("Unvalid Password")]
    InvalidPassword,
}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Outcome of one login form recomputation.
///
/// `is_valid` is derived from the two error slots, so a valid result never
/// carries an error and an invalid one always carries at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Validation {
    is_valid: bool,
    email_error: Option<ValidationError>,
    password_error: Option<ValidationError>,
}

impl Validation {
    pub fn new(
        email_error: Option<ValidationError>,
        password_error: Option<ValidationError>,
    ) -> Self {
        Self {
            is_valid: email_error.is_none() && password_error.is_none(),
            email_error,
            password_error,
        }
    }

    pub fn valid() -> Self {
        Self::new(None, None)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn email_error(&self) -> Option<ValidationError> {
        self.email_error
    }

    pub fn password_error(&self) -> Option<ValidationError> {
        self.password_error
    }

    pub fn email_error_message(&self) -> Option<String> {
        self.email_error.map(|error| error.to_string())
    }

    pub fn password_error_message(&self) -> Option<String> {
        self.password_error.map(|error| error.to_string())
    }
}

/// Login form body accepted by the one-shot surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form body accepted by the one-shot surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
