use std::time::Duration;

use futures::StreamExt;
use jobby::config::FormsConfig;
use jobby::forms::{
    validate_login_form, Field, FieldInput, FormValidator, Validation, ValidationError,
};
use tokio::runtime::{Builder, Handle};

fn compute_runtime() -> tokio::runtime::Runtime {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("jobby-compute")
        .enable_all()
        .build()
        .expect("compute runtime builds")
}

#[test]
fn login_scenarios_match_screen_expectations() {
    assert_eq!(
        validate_login_form("a@b.com", "12345678"),
        Validation::new(None, None)
    );
    assert_eq!(
        validate_login_form("bad", "short"),
        Validation::new(
            Some(ValidationError::InvalidEmail),
            Some(ValidationError::InvalidPassword)
        )
    );
    assert_eq!(
        validate_login_form("a@b.com", "short"),
        Validation::new(None, Some(ValidationError::InvalidPassword))
    );
}

#[tokio::test]
async fn login_pipeline_recomputes_on_a_dedicated_runtime() {
    let compute = compute_runtime();
    let validator = FormValidator::new(compute.handle().clone())
        .with_debounce(Duration::from_millis(30));

    let email = FieldInput::new(Field::Email);
    let password = FieldInput::new(Field::Password);
    let mut validations = validator.validate_login(email.subscribe(), password.subscribe());

    tokio::time::sleep(Duration::from_millis(80)).await;
    email.set("a@b.com");
    password.set("short");

    let validation = tokio::time::timeout(Duration::from_secs(2), validations.next())
        .await
        .expect("validation arrives")
        .expect("stream still open");
    assert_eq!(
        validation.password_error_message().as_deref(),
        Some("Unvalid Password")
    );
    assert_eq!(validation.email_error_message(), None);

    drop(validations);
    compute.shutdown_background();
}

#[tokio::test(start_paused = true)]
async fn configured_debounce_is_applied() {
    let config = FormsConfig {
        debounce: Duration::from_millis(200),
    };
    let validator = FormValidator::from_config(Handle::current(), &config);
    assert_eq!(validator.debounce(), Duration::from_millis(200));

    let email = FieldInput::new(Field::Email);
    let password = FieldInput::new(Field::Password);
    let mut validations = validator.validate_login(email.subscribe(), password.subscribe());

    tokio::time::sleep(Duration::from_millis(250)).await;
    let started = tokio::time::Instant::now();
    email.set("a@b.com");
    password.set("12345678");

    let validation = validations.next().await.expect("validation emitted");
    assert!(validation.is_valid());
    let waited = started.elapsed();
    assert!(waited >= Duration::from_millis(200) && waited < Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn default_config_matches_screen_debounce() {
    let validator = FormValidator::from_config(Handle::current(), &FormsConfig::default());
    assert_eq!(validator.debounce(), Duration::from_millis(500));
}
