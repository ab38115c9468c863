//! Live validation of the login and registration forms.
//!
//! Field inputs are combined, debounced where the screen asks for it, and
//! re-validated on a compute runtime. The rules themselves are pure and total;
//! the router exposes them for single submissions.

mod combine;
pub mod domain;
mod input;
mod pipeline;
pub mod router;
pub mod rules;

#[cfg(test)]
mod tests;

pub use combine::FormSnapshot;
pub use domain::{Field, FieldValue, LoginForm, RegisterForm, Validation, ValidationError};
pub use input::FieldInput;
pub use pipeline::{FormValidator, ValidationStream, DEFAULT_DEBOUNCE};
pub use router::{form_router, LoginValidationView, RegisterValidationView};
pub use rules::{is_email, validate_login_form, validate_register_form};
