use clap::{Args, Subcommand};
use futures::StreamExt;
use jobby::config::AppConfig;
use jobby::error::AppError;
use jobby::forms::{
    validate_login_form, validate_register_form, Field, FieldInput, FormValidator,
    LoginValidationView, RegisterValidationView, Validation, ValidationStream,
};
use jobby::telemetry;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tracing::debug;

#[derive(Subcommand, Debug)]
pub(crate) enum WatchCommand {
    /// Email and password with per-field errors, debounced
    Login,
    /// Name, email and password with a single pass/fail result
    Register,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CheckCommand {
    /// Validate a login form
    Login(LoginCheckArgs),
    /// Validate a registration form
    Register(RegisterCheckArgs),
}

#[derive(Args, Debug)]
pub(crate) struct LoginCheckArgs {
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    #[arg(long, default_value = "")]
    pub(crate) password: String,
}

#[derive(Args, Debug)]
pub(crate) struct RegisterCheckArgs {
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    #[arg(long, default_value = "")]
    pub(crate) password: String,
}

pub(crate) fn run_check(command: CheckCommand) -> Result<(), AppError> {
    let payload = match command {
        CheckCommand::Login(args) => {
            let validation = validate_login_form(&args.email, &args.password);
            serde_json::to_value(LoginValidationView::from(validation))?
        }
        CheckCommand::Register(args) => {
            let is_valid = validate_register_form(&args.name, &args.email, &args.password);
            serde_json::to_value(RegisterValidationView::new(is_valid))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Console stand-in for the login/register screens: stdin lines update the
/// field inputs and every emitted result is printed.
pub(crate) async fn run_watch(command: WatchCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let validator = FormValidator::from_config(Handle::current(), &config.forms);

    match command {
        WatchCommand::Login => {
            let email = FieldInput::new(Field::Email);
            let password = FieldInput::new(Field::Password);
            let validations = validator.validate_login(email.subscribe(), password.subscribe());
            println!(
                "login form: type `email <value>` or `password <value>`, debounce {} ms",
                validator.debounce().as_millis()
            );

            let printer = tokio::spawn(print_results(validations, render_login));
            feed_inputs(&[&email, &password]).await?;
            drop((email, password));
            printer.await.map_err(std::io::Error::other)?;
        }
        WatchCommand::Register => {
            let name = FieldInput::new(Field::Name);
            let email = FieldInput::new(Field::Email);
            let password = FieldInput::new(Field::Password);
            let results = validator.validate_register(
                name.subscribe(),
                email.subscribe(),
                password.subscribe(),
            );
            println!("register form: type `name <value>`, `email <value>` or `password <value>`");

            let printer = tokio::spawn(print_results(results, render_register));
            feed_inputs(&[&name, &email, &password]).await?;
            drop((name, email, password));
            printer.await.map_err(std::io::Error::other)?;
        }
    }

    Ok(())
}

async fn print_results<T>(mut results: ValidationStream<T>, render: fn(&T) -> String)
where
    T: Send + 'static,
{
    while let Some(result) = results.next().await {
        println!("{}", render(&result));
    }
    debug!("form pipeline finished");
}

async fn feed_inputs(inputs: &[&FieldInput]) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let Some((field, value)) = parse_field_line(&line) else {
            eprintln!("expected `<field> <value>`, got `{line}`");
            continue;
        };

        match inputs.iter().find(|input| input.field() == field) {
            Some(input) => {
                input.set(value);
            }
            None => eprintln!("field `{}` is not part of this form", field.label()),
        }
    }

    Ok(())
}

/// Splits `email a@b.com` into the field and its new value. A bare field
/// name clears the field.
fn parse_field_line(line: &str) -> Option<(Field, String)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (name, value) = line.split_once(' ').unwrap_or((line, ""));
    Field::parse(name).map(|field| (field, value.to_string()))
}

fn render_login(validation: &Validation) -> String {
    json!({
        "is_valid": validation.is_valid(),
        "email_error": validation.email_error_message(),
        "password_error": validation.password_error_message(),
    })
    .to_string()
}

fn render_register(is_valid: &bool) -> String {
    json!({ "is_valid": is_valid }).to_string()
}
