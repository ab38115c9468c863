use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::domain::Field;

/// Writable state of one form field, seeded with an empty value.
///
/// Subscribers see the current value first and then every distinct change.
/// Dropping the input ends all of its subscriptions.
#[derive(Debug)]
pub struct FieldInput {
    field: Field,
    sender: watch::Sender<String>,
}

impl FieldInput {
    pub fn new(field: Field) -> Self {
        let (sender, _) = watch::channel(String::new());
        Self { field, sender }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Replaces the value. Returns `false` when it was unchanged.
    pub fn set(&self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    pub fn current(&self) -> String {
        self.sender.borrow().clone()
    }

    /// Number of live subscriptions, including ones held by a pipeline.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn subscribe(&self) -> WatchStream<String> {
        WatchStream::new(self.sender.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn subscribers_start_from_current_value() {
        let input = FieldInput::new(Field::Email);
        input.set("a@b.com");

        let mut values = input.subscribe();
        assert_eq!(values.next().await.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn unchanged_values_are_not_republished() {
        let input = FieldInput::new(Field::Password);

        assert!(!input.set(""));
        assert!(input.set("secret"));
        assert!(!input.set("secret"));
        assert_eq!(input.current(), "secret");
    }

    #[tokio::test]
    async fn dropping_the_input_ends_subscriptions() {
        let input = FieldInput::new(Field::Name);
        let mut values = input.subscribe();
        drop(input);

        assert_eq!(values.next().await.as_deref(), Some(""));
        assert!(values.next().await.is_none());
    }
}
