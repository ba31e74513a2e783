use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ModelError, ModelResult};
use crate::events::{CallbackOutcome, LifecycleEvent, ModelCallback};
use crate::model::Record;

/// Shared handle to a registered callback
pub type SharedCallback = Arc<dyn ModelCallback>;

/// Callbacks per lifecycle event, kept in registration order
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<LifecycleEvent, Vec<SharedCallback>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }

    pub fn register(&mut self, event: LifecycleEvent, callback: SharedCallback) {
        self.callbacks.entry(event).or_default().push(callback);
    }

    /// Callbacks registered for `event`, empty when none
    pub fn get(&self, event: LifecycleEvent) -> &[SharedCallback] {
        self.callbacks.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn callback_count(&self, event: LifecycleEvent) -> usize {
        self.get(event).len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.values().all(Vec::is_empty)
    }

    /// Run the callbacks for `event` one after another against `record`.
    ///
    /// Each callback sees the mutations of the ones before it. The first
    /// callback that halts or fails stops the pipeline; the rest are skipped.
    pub async fn trigger(&self, event: LifecycleEvent, record: &mut Record) -> ModelResult<()> {
        for (position, callback) in self.get(event).iter().enumerate() {
            match callback.call(record).await {
                Ok(CallbackOutcome::Continue) => {}
                Ok(CallbackOutcome::Halt) => {
                    tracing::debug!(%event, position, "callback halted the pipeline");
                    return Err(ModelError::callback_halted(
                        event,
                        format!("{} callback halted the operation", event),
                    ));
                }
                Err(error) => {
                    tracing::debug!(%event, position, "callback raised: {}", error);
                    return Err(ModelError::callback_halted(
                        event,
                        format!("Error in {} callback: {}", event, error),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(&'static str, usize)> = self
            .callbacks
            .iter()
            .map(|(event, callbacks)| (event.as_str(), callbacks.len()))
            .collect();
        counts.sort();
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &counts)
            .finish()
    }
}
