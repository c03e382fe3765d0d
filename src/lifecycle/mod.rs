//! Asynchronous operation lifecycle manager.
//!
//! [`Operation`] wraps one injected async action and tracks its progress as
//! idle, pending, succeeded or failed. Callers trigger it with
//! [`Operation::invoke`], observe it through the state accessors or an
//! [`OperationObserver`], and return it to idle with [`Operation::reset`].
//!
//! # Overlapping invocations
//!
//! Nothing is de-duplicated: invoking while pending starts a second attempt.
//! Every `invoke` and `reset` takes a new request token, and a settlement
//! whose token is no longer current is discarded. The state therefore always
//! reflects the most recent invocation, whatever order the attempts settle
//! in. Discarded settlements still resolve their own `invoke` future.
//!
//! A failed re-invocation does not keep the previous result around: `invoke`
//! clears it as soon as the operation goes pending.
//!
//! Settlement futures hold only a weak reference to the manager, so an
//! outcome arriving after the manager was dropped is ignored.

pub mod state;

pub use state::{OperationEvent, OperationObserver, OperationState, OperationStatus};

use crate::errors::{ActionError, AppError, AppResult};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

type Action<P, R> = Arc<dyn Fn(P) -> BoxFuture<'static, Result<R, ActionError>> + Send + Sync>;

const DEFAULT_OPERATION_NAME: &str = "operation";

struct Tracked<R> {
    state: OperationState<R>,
    token: u64,
}

struct Shared<R> {
    name: String,
    tracked: Mutex<Tracked<R>>,
    observers: Vec<Arc<dyn OperationObserver<R>>>,
}

impl<R: Clone> Shared<R> {
    fn lock(&self) -> MutexGuard<'_, Tracked<R>> {
        // Observers run outside the lock, so a poisoned guard still holds a
        // consistent state.
        self.tracked.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, event: &OperationEvent<'_, R>) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    fn begin(&self) -> u64 {
        let token = {
            let mut tracked = self.lock();
            tracked.token += 1;
            tracked.state = OperationState::Pending;
            tracked.token
        };
        debug!(operation = %self.name, token, "Operation pending");
        self.notify(&OperationEvent::Started);
        token
    }

    fn settle(&self, token: u64, outcome: &Result<R, ActionError>) {
        {
            let mut tracked = self.lock();
            if tracked.token != token {
                debug!(
                    operation = %self.name,
                    token,
                    current = tracked.token,
                    "Discarding stale settlement"
                );
                return;
            }
            tracked.state = match outcome {
                Ok(result) => OperationState::Succeeded(result.clone()),
                Err(error) => OperationState::Failed(error.clone()),
            };
        }

        match outcome {
            Ok(result) => {
                debug!(operation = %self.name, token, "Operation succeeded");
                self.notify(&OperationEvent::Succeeded(result));
            }
            Err(error) => {
                debug!(operation = %self.name, token, "Operation failed: {}", error);
                self.notify(&OperationEvent::Failed(error));
            }
        }
    }

    fn reset(&self) {
        {
            let mut tracked = self.lock();
            tracked.token += 1;
            tracked.state = OperationState::Idle;
        }
        debug!(operation = %self.name, "Operation reset");
        self.notify(&OperationEvent::Reset);
    }
}

/// Tracks the lifecycle of one injected asynchronous action.
///
/// Each use site owns its own `Operation`; there is no shared global state.
///
/// # Examples
///
/// ```
/// use jotter::lifecycle::{Operation, OperationStatus};
/// use std::io;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let save = Operation::new(|title: String| async move {
///     if title.is_empty() {
///         Err(io::Error::new(io::ErrorKind::InvalidInput, "title required"))
///     } else {
///         Ok(title.len())
///     }
/// });
///
/// let pending = save.invoke("Morning Walk".to_string());
/// assert_eq!(save.status(), OperationStatus::Pending);
/// assert_eq!(pending.await.unwrap(), 12);
/// assert_eq!(save.result(), Some(12));
///
/// assert!(save.invoke(String::new()).await.is_err());
/// assert_eq!(save.status(), OperationStatus::Failed);
/// assert_eq!(save.error().unwrap().message(), "title required");
/// # });
/// ```
pub struct Operation<P, R> {
    action: Action<P, R>,
    shared: Arc<Shared<R>>,
    timeout: Option<Duration>,
    auto_start: Mutex<Option<JoinHandle<Result<R, ActionError>>>>,
}

impl<P, R> Operation<P, R>
where
    P: 'static,
    R: Clone + Send + 'static,
{
    /// Wraps `action` with no timeout, no observers and no auto-start.
    pub fn new<F, Fut, E>(action: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Self::from_parts(
            erase(action),
            DEFAULT_OPERATION_NAME.to_string(),
            None,
            Vec::new(),
        )
    }

    /// Starts configuring an operation around `action`.
    pub fn builder<F, Fut, E>(action: F) -> OperationBuilder<P, R>
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        OperationBuilder {
            action: erase(action),
            name: DEFAULT_OPERATION_NAME.to_string(),
            timeout: None,
            observers: Vec::new(),
            auto_start: None,
        }
    }

    fn from_parts(
        action: Action<P, R>,
        name: String,
        timeout: Option<Duration>,
        observers: Vec<Arc<dyn OperationObserver<R>>>,
    ) -> Self {
        Self {
            action,
            shared: Arc::new(Shared {
                name,
                tracked: Mutex::new(Tracked {
                    state: OperationState::Idle,
                    token: 0,
                }),
                observers,
            }),
            timeout,
            auto_start: Mutex::new(None),
        }
    }

    /// Runs the action with `payload`.
    ///
    /// The operation is `Pending`, with any previous result or error cleared,
    /// by the time this returns; the returned future drives the action and
    /// records its settlement. A failure is stored, reported to observers and
    /// also returned, so the caller can react to it locally.
    pub fn invoke(
        &self,
        payload: P,
    ) -> impl Future<Output = Result<R, ActionError>> + Send + 'static {
        let token = self.shared.begin();
        let attempt = (self.action)(payload);
        let shared = Arc::downgrade(&self.shared);
        let timeout = self.timeout;

        async move {
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, attempt)
                    .await
                    .unwrap_or_else(|_| Err(ActionError::timed_out(limit))),
                None => attempt.await,
            };

            match shared.upgrade() {
                Some(shared) => shared.settle(token, &outcome),
                None => debug!(token, "Operation dropped before settlement"),
            }
            outcome
        }
    }

    /// Returns to `Idle` from any state and invalidates in-flight attempts.
    pub fn reset(&self) {
        self.shared.reset();
    }

    pub fn state(&self) -> OperationState<R> {
        self.shared.lock().state.clone()
    }

    pub fn status(&self) -> OperationStatus {
        self.shared.lock().state.status()
    }

    pub fn result(&self) -> Option<R> {
        self.shared.lock().state.result().cloned()
    }

    pub fn error(&self) -> Option<ActionError> {
        self.shared.lock().state.error().cloned()
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Handle of the attempt spawned by [`OperationBuilder::auto_start`].
    ///
    /// Returns `None` when auto-start was not requested or the handle was
    /// already taken.
    pub fn take_auto_start(&self) -> Option<JoinHandle<Result<R, ActionError>>> {
        self.auto_start
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<P, R> fmt::Debug for Operation<P, R>
where
    R: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tracked = self.shared.lock();
        f.debug_struct("Operation")
            .field("name", &self.shared.name)
            .field("status", &tracked.state.status())
            .field("token", &tracked.token)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Boxes an action and normalizes its error type.
fn erase<P, R, F, Fut, E>(action: F) -> Action<P, R>
where
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    E: StdError + Send + Sync + 'static,
    P: 'static,
    R: 'static,
{
    Arc::new(move |payload: P| {
        action(payload)
            .map(|outcome| outcome.map_err(ActionError::from_cause))
            .boxed()
    })
}

/// Configures an [`Operation`] before it is built.
pub struct OperationBuilder<P, R> {
    action: Action<P, R>,
    name: String,
    timeout: Option<Duration>,
    observers: Vec<Arc<dyn OperationObserver<R>>>,
    auto_start: Option<P>,
}

impl<P, R> OperationBuilder<P, R>
where
    P: 'static,
    R: Clone + Send + 'static,
{
    /// Name used in log lines.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fails an attempt that has not settled within `limit`.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn observe<O>(mut self, observer: O) -> Self
    where
        O: OperationObserver<R> + 'static,
    {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Invokes the action with `payload` as soon as the operation is built.
    pub fn auto_start(mut self, payload: P) -> Self {
        self.auto_start = Some(payload);
        self
    }

    /// Builds the operation, spawning the auto-start attempt if one was
    /// requested.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Runtime` when auto-start was requested outside a
    /// tokio runtime.
    pub fn build(self) -> AppResult<Operation<P, R>> {
        let runtime = match self.auto_start {
            Some(_) => Some(tokio::runtime::Handle::try_current().map_err(|e| {
                AppError::Runtime(format!(
                    "Auto-starting '{}' requires a tokio runtime: {}",
                    self.name, e
                ))
            })?),
            None => None,
        };

        let operation = Operation::from_parts(self.action, self.name, self.timeout, self.observers);

        if let (Some(runtime), Some(payload)) = (runtime, self.auto_start) {
            debug!(operation = %operation.name(), "Auto-starting operation");
            let handle = runtime.spawn(operation.invoke(payload));
            *operation
                .auto_start
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(handle);
        }

        Ok(operation)
    }
}
