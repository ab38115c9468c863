use std::time::Duration;

use futures::StreamExt;
use jobby::forms::{validate_register_form, Field, FieldInput, FormValidator};
use tokio::runtime::{Builder, Handle};

#[test]
fn register_requires_name_email_and_password() {
    assert!(validate_register_form("Ada Lovelace", "ada@analytical.engine", "difference"));
    assert!(!validate_register_form("", "ada@analytical.engine", "difference"));
    assert!(!validate_register_form("Ada", "ada", "difference"));
    assert!(!validate_register_form("Ada", "ada@analytical.engine", "diff"));
}

#[tokio::test(start_paused = true)]
async fn register_pipeline_follows_typing() {
    let name = FieldInput::new(Field::Name);
    let email = FieldInput::new(Field::Email);
    let password = FieldInput::new(Field::Password);
    let mut results = FormValidator::new(Handle::current()).validate_register(
        name.subscribe(),
        email.subscribe(),
        password.subscribe(),
    );

    assert_eq!(results.next().await, Some(false));

    name.set("Ada");
    email.set("ada@analytical.engine");
    password.set("difference");

    let mut last = None;
    while last != Some(true) {
        last = results.next().await;
        assert!(last.is_some(), "stream stays open while inputs live");
    }

    password.set("diff");
    assert_eq!(results.next().await, Some(false));
}

#[tokio::test]
async fn register_stream_ends_when_compute_runtime_is_gone() {
    let compute = Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("compute runtime builds");
    let validator = FormValidator::new(compute.handle().clone());
    compute.shutdown_background();

    let name = FieldInput::new(Field::Name);
    let email = FieldInput::new(Field::Email);
    let password = FieldInput::new(Field::Password);
    let mut results =
        validator.validate_register(name.subscribe(), email.subscribe(), password.subscribe());

    let next = tokio::time::timeout(Duration::from_secs(2), results.next())
        .await
        .expect("stream ends instead of hanging");
    assert_eq!(next, None);
}
