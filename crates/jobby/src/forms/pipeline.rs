use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::{Stream, StreamExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, trace, warn};

use super::combine::{CombineLatest, FormSnapshot};
use super::domain::{Field, Validation};
use super::rules;
use crate::config::FormsConfig;

/// Quiet period the login form waits for before recomputing.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

const OUTPUT_BUFFER: usize = 16;

/// Builds live validation streams for the login and registration screens.
///
/// Recomputation runs on the `compute` runtime; the driver that combines and
/// debounces the inputs runs on the runtime the stream is created from.
#[derive(Debug, Clone)]
pub struct FormValidator {
    compute: Handle,
    debounce: Duration,
}

impl FormValidator {
    pub fn new(compute: Handle) -> Self {
        Self {
            compute,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn from_config(compute: Handle, config: &FormsConfig) -> Self {
        Self::new(compute).with_debounce(config.debounce)
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Per-field login validation, debounced and without the seed emission.
    ///
    /// Must be called from within a tokio runtime.
    pub fn validate_login<E, P>(&self, emails: E, passwords: P) -> ValidationStream<Validation>
    where
        E: Stream<Item = String> + Send + 'static,
        P: Stream<Item = String> + Send + 'static,
    {
        let inputs = CombineLatest::new(vec![
            (Field::Email, emails.boxed()),
            (Field::Password, passwords.boxed()),
        ]);
        let policy = EmissionPolicy {
            debounce: Some(self.debounce),
            skip_initial: 1,
        };

        self.spawn("login", inputs, policy, |snapshot| {
            let email = snapshot.value(Field::Email);
            let password = snapshot.value(Field::Password);
            let validation = rules::validate_login_form(email, password);
            trace!(
                form = "login",
                email_len = email.len(),
                password_len = password.len(),
                is_valid = validation.is_valid(),
                "recomputed form validation"
            );
            validation
        })
    }

    /// Pass/fail registration validation for every combined change.
    ///
    /// Must be called from within a tokio runtime.
    pub fn validate_register<N, E, P>(
        &self,
        names: N,
        emails: E,
        passwords: P,
    ) -> ValidationStream<bool>
    where
        N: Stream<Item = String> + Send + 'static,
        E: Stream<Item = String> + Send + 'static,
        P: Stream<Item = String> + Send + 'static,
    {
        let inputs = CombineLatest::new(vec![
            (Field::Name, names.boxed()),
            (Field::Email, emails.boxed()),
            (Field::Password, passwords.boxed()),
        ]);
        let policy = EmissionPolicy {
            debounce: None,
            skip_initial: 0,
        };

        self.spawn("register", inputs, policy, |snapshot| {
            let name = snapshot.value(Field::Name);
            let email = snapshot.value(Field::Email);
            let password = snapshot.value(Field::Password);
            let is_valid = rules::validate_register_form(name, email, password);
            trace!(
                form = "register",
                name_len = name.len(),
                email_len = email.len(),
                password_len = password.len(),
                is_valid,
                "recomputed form validation"
            );
            is_valid
        })
    }

    fn spawn<T, F>(
        &self,
        form: &'static str,
        inputs: CombineLatest,
        policy: EmissionPolicy,
        check: F,
    ) -> ValidationStream<T>
    where
        T: Send + 'static,
        F: Fn(&FormSnapshot) -> T + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(OUTPUT_BUFFER);
        let driver = Driver {
            form,
            inputs,
            skip_remaining: policy.skip_initial,
            debounce: policy.debounce,
            compute: self.compute.clone(),
            check: Arc::new(check),
            tx,
        };

        ValidationStream {
            results: ReceiverStream::new(rx),
            driver: tokio::spawn(driver.run()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct EmissionPolicy {
    debounce: Option<Duration>,
    skip_initial: usize,
}

struct Driver<T, F> {
    form: &'static str,
    inputs: CombineLatest,
    skip_remaining: usize,
    debounce: Option<Duration>,
    compute: Handle,
    check: Arc<F>,
    tx: mpsc::Sender<T>,
}

impl<T, F> Driver<T, F>
where
    T: Send + 'static,
    F: Fn(&FormSnapshot) -> T + Send + Sync + 'static,
{
    async fn run(mut self) {
        let mut pending: Option<FormSnapshot> = None;
        let quiet = tokio::time::sleep(Duration::ZERO);
        tokio::pin!(quiet);

        loop {
            tokio::select! {
                biased;

                _ = self.tx.closed() => {
                    debug!(form = self.form, "consumer dropped, stopping form validation");
                    break;
                }

                _ = &mut quiet, if pending.is_some() => {
                    if let Some(snapshot) = pending.take() {
                        if !self.emit(snapshot).await {
                            break;
                        }
                    }
                }

                next = self.inputs.next() => match next {
                    Some(snapshot) => match self.debounce {
                        Some(window) => {
                            pending = Some(snapshot);
                            quiet.as_mut().reset(Instant::now() + window);
                        }
                        None => {
                            if !self.emit(snapshot).await {
                                break;
                            }
                        }
                    },
                    None => {
                        if let Some(snapshot) = pending.take() {
                            self.emit(snapshot).await;
                        }
                        debug!(form = self.form, "form inputs closed");
                        break;
                    }
                },
            }
        }
    }

    /// Returns `false` once nothing more can be delivered.
    async fn emit(&mut self, snapshot: FormSnapshot) -> bool {
        if self.skip_remaining > 0 {
            self.skip_remaining -= 1;
            debug!(form = self.form, "skipping seed form state");
            return true;
        }

        if let Some(changed_at) = snapshot.last_changed() {
            trace!(
                form = self.form,
                quiet_ms = changed_at.elapsed().as_millis() as u64,
                "recomputing form validation"
            );
        }

        let check = Arc::clone(&self.check);
        let result = match self.compute.spawn(async move { check(&snapshot) }).await {
            Ok(result) => result,
            Err(err) => {
                warn!(form = self.form, error = %err, "form validation task failed");
                return false;
            }
        };

        self.tx.send(result).await.is_ok()
    }
}

/// Live sequence of validation results.
///
/// Dropping it stops the driver and releases every field input at once.
#[derive(Debug)]
pub struct ValidationStream<T> {
    results: ReceiverStream<T>,
    driver: JoinHandle<()>,
}

impl<T> ValidationStream<T> {
    /// Stops the pipeline without waiting for the stream to be dropped.
    pub fn close(&mut self) {
        self.driver.abort();
        self.results.close();
    }
}

impl<T> Unpin for ValidationStream<T> {}

impl<T> Stream for ValidationStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.results.poll_next_unpin(cx)
    }
}

impl<T> Drop for ValidationStream<T> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}
