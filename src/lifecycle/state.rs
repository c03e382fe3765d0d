//! Operation state, transition events and observers.

use crate::errors::ActionError;
use std::fmt;

/// Where an operation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Idle => "idle",
            OperationStatus::Pending => "pending",
            OperationStatus::Succeeded => "succeeded",
            OperationStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of an operation.
///
/// A result exists only in `Succeeded` and an error only in `Failed`, so
/// neither can outlive the status it belongs to.
#[derive(Debug, Clone, Default)]
pub enum OperationState<R> {
    #[default]
    Idle,
    Pending,
    Succeeded(R),
    Failed(ActionError),
}

impl<R> OperationState<R> {
    pub fn status(&self) -> OperationStatus {
        match self {
            OperationState::Idle => OperationStatus::Idle,
            OperationState::Pending => OperationStatus::Pending,
            OperationState::Succeeded(_) => OperationStatus::Succeeded,
            OperationState::Failed(_) => OperationStatus::Failed,
        }
    }

    pub fn result(&self) -> Option<&R> {
        match self {
            OperationState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            OperationState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OperationState::Pending)
    }
}

/// A state transition that was applied to an operation.
///
/// Settlements discarded as stale never produce an event.
#[derive(Debug)]
pub enum OperationEvent<'a, R> {
    Started,
    Succeeded(&'a R),
    Failed(&'a ActionError),
    Reset,
}

impl<R> OperationEvent<'_, R> {
    /// The status the operation entered with this event.
    pub fn status(&self) -> OperationStatus {
        match self {
            OperationEvent::Started => OperationStatus::Pending,
            OperationEvent::Succeeded(_) => OperationStatus::Succeeded,
            OperationEvent::Failed(_) => OperationStatus::Failed,
            OperationEvent::Reset => OperationStatus::Idle,
        }
    }
}

/// Receives transition events, for example to show a toast on failure.
///
/// Observers are called after the state lock is released, once per applied
/// transition. Closures taking `&OperationEvent<'_, R>` implement this trait.
pub trait OperationObserver<R>: Send + Sync {
    fn on_event(&self, event: &OperationEvent<'_, R>);
}

impl<R, F> OperationObserver<R> for F
where
    F: Fn(&OperationEvent<'_, R>) + Send + Sync,
{
    fn on_event(&self, event: &OperationEvent<'_, R>) {
        self(event)
    }
}
