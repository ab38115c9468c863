use futures::stream::{self, BoxStream, SelectAll, StreamExt};
use tokio::time::Instant;

use super::domain::{Field, FieldValue};

/// Latest value of every tracked field at the moment one of them changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    values: Vec<FieldValue>,
}

impl FormSnapshot {
    /// Latest value for `field`, or `""` when the field is not tracked.
    pub fn value(&self, field: Field) -> &str {
        self.values
            .iter()
            .find(|value| value.field == field)
            .map(|value| value.value.as_str())
            .unwrap_or("")
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// When the most recent of the combined fields changed.
    pub fn last_changed(&self) -> Option<Instant> {
        self.values.iter().map(|value| value.changed_at).max()
    }
}

enum InputEvent {
    Changed(usize, String),
    Ended(usize),
}

/// Combine-latest over a fixed set of field inputs.
///
/// Yields nothing until every input produced a value, then one snapshot per
/// change. Ends early if an input closes before its first value, otherwise
/// once all inputs have closed.
pub(crate) struct CombineLatest {
    fields: Vec<Field>,
    latest: Vec<Option<FieldValue>>,
    inputs: SelectAll<BoxStream<'static, InputEvent>>,
    finished: bool,
}

impl CombineLatest {
    pub(crate) fn new(inputs: Vec<(Field, BoxStream<'static, String>)>) -> Self {
        let fields = inputs.iter().map(|(field, _)| *field).collect::<Vec<_>>();
        let latest = vec![None; fields.len()];
        let inputs = stream::select_all(inputs.into_iter().enumerate().map(
            |(index, (_, input))| {
                input
                    .map(move |value| InputEvent::Changed(index, value))
                    .chain(stream::once(async move { InputEvent::Ended(index) }))
                    .boxed()
            },
        ));

        Self {
            fields,
            latest,
            inputs,
            finished: false,
        }
    }

    /// Next combined snapshot. Cancel safe: state only changes after an
    /// input event has been received.
    pub(crate) async fn next(&mut self) -> Option<FormSnapshot> {
        if self.finished {
            return None;
        }

        while let Some(event) = self.inputs.next().await {
            match event {
                InputEvent::Changed(index, value) => {
                    self.latest[index] = Some(FieldValue::new(self.fields[index], value));
                    if let Some(snapshot) = self.snapshot() {
                        return Some(snapshot);
                    }
                }
                InputEvent::Ended(index) => {
                    if self.latest[index].is_none() {
                        tracing::debug!(
                            field = self.fields[index].label(),
                            "input closed before producing a value"
                        );
                        break;
                    }
                }
            }
        }

        self.finished = true;
        None
    }

    fn snapshot(&self) -> Option<FormSnapshot> {
        let values = self
            .latest
            .iter()
            .cloned()
            .collect::<Option<Vec<_>>>()?;
        Some(FormSnapshot { values })
    }
}
