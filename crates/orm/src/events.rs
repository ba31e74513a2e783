use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::ModelError;
use crate::event_error::EventError;
use crate::model::Record;

/// The eight points in a record's lifecycle where callbacks run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LifecycleEvent {
    BeforeSave,
    AfterSave,
    BeforeCreate,
    AfterCreate,
    BeforeUpdate,
    AfterUpdate,
    BeforeDestroy,
    AfterDestroy,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 8] = [
        LifecycleEvent::BeforeSave,
        LifecycleEvent::AfterSave,
        LifecycleEvent::BeforeCreate,
        LifecycleEvent::AfterCreate,
        LifecycleEvent::BeforeUpdate,
        LifecycleEvent::AfterUpdate,
        LifecycleEvent::BeforeDestroy,
        LifecycleEvent::AfterDestroy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::BeforeSave => "beforeSave",
            LifecycleEvent::AfterSave => "afterSave",
            LifecycleEvent::BeforeCreate => "beforeCreate",
            LifecycleEvent::AfterCreate => "afterCreate",
            LifecycleEvent::BeforeUpdate => "beforeUpdate",
            LifecycleEvent::AfterUpdate => "afterUpdate",
            LifecycleEvent::BeforeDestroy => "beforeDestroy",
            LifecycleEvent::AfterDestroy => "afterDestroy",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecycleEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| {
                ModelError::configuration(format!("Unknown lifecycle event '{}'", s))
            })
    }
}

/// What a callback asks the pipeline to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackOutcome {
    #[default]
    Continue,
    /// Stop the pipeline and fail the enclosing operation
    Halt,
}

impl From<()> for CallbackOutcome {
    fn from(_: ()) -> Self {
        CallbackOutcome::Continue
    }
}

impl From<bool> for CallbackOutcome {
    fn from(proceed: bool) -> Self {
        if proceed {
            CallbackOutcome::Continue
        } else {
            CallbackOutcome::Halt
        }
    }
}

/// A lifecycle callback.
///
/// Receives the record being written and may mutate it in place. Returning
/// [`CallbackOutcome::Halt`] or an error aborts the enclosing operation.
#[async_trait]
pub trait ModelCallback: Send + Sync {
    async fn call(&self, record: &mut Record) -> Result<CallbackOutcome, EventError>;
}

/// Adapter turning a synchronous closure into a [`ModelCallback`]
pub struct FnCallback<F> {
    f: F,
}

impl<F> FnCallback<F>
where
    F: Fn(&mut Record) -> Result<CallbackOutcome, EventError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> ModelCallback for FnCallback<F>
where
    F: Fn(&mut Record) -> Result<CallbackOutcome, EventError> + Send + Sync,
{
    async fn call(&self, record: &mut Record) -> Result<CallbackOutcome, EventError> {
        (self.f)(record)
    }
}
