use axum::response::Response;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::forms::FormValidator;

pub(super) const VALID_EMAIL: &str = "a@b.com";
pub(super) const VALID_PASSWORD: &str = "12345678";

pub(super) fn validator() -> FormValidator {
    FormValidator::new(Handle::current())
}

/// Manually driven field input.
pub(super) fn channel_input() -> (mpsc::UnboundedSender<String>, UnboundedReceiverStream<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}

pub(super) fn send(tx: &mpsc::UnboundedSender<String>, value: &str) {
    tx.send(value.to_string()).expect("pipeline still subscribed");
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
