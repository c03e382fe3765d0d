//! Integration tests for the operation lifecycle manager.
//!
//! Settlement order is controlled with oneshot channels passed in as the
//! payload, so races are reproduced deterministically.

use jotter::errors::{ActionError, AppError};
use jotter::lifecycle::{Operation, OperationEvent, OperationStatus};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// An operation that settles with whatever arrives on the payload channel.
fn gated() -> Operation<oneshot::Receiver<Result<u32, String>>, u32> {
    Operation::new(|gate: oneshot::Receiver<Result<u32, String>>| async move {
        match gate.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(io::Error::new(io::ErrorKind::Other, message)),
            Err(_) => Err(io::Error::new(io::ErrorKind::BrokenPipe, "gate dropped")),
        }
    })
}

#[tokio::test]
async fn test_success_round_trip() {
    let operation = gated();
    let (tx, rx) = oneshot::channel();

    let attempt = operation.invoke(rx);
    assert_eq!(operation.status(), OperationStatus::Pending);

    tx.send(Ok(42)).unwrap();
    assert_eq!(attempt.await.unwrap(), 42);
    assert_eq!(operation.status(), OperationStatus::Succeeded);
    assert_eq!(operation.result(), Some(42));
    assert!(operation.error().is_none());
}

#[tokio::test]
async fn test_failure_round_trip() {
    let operation = gated();
    let (tx, rx) = oneshot::channel();

    let attempt = operation.invoke(rx);
    tx.send(Err("disk full".to_string())).unwrap();

    let error = attempt.await.unwrap_err();
    assert_eq!(error.message(), "disk full");
    assert_eq!(operation.status(), OperationStatus::Failed);
    assert!(operation.result().is_none());
    assert_eq!(operation.error().unwrap().message(), "disk full");

    let cause = error.cause().expect("cause should be kept");
    assert_eq!(cause.to_string(), "disk full");
}

#[tokio::test]
async fn test_failure_after_success_clears_result() {
    let operation = gated();

    let (tx, rx) = oneshot::channel();
    let attempt = operation.invoke(rx);
    tx.send(Ok(1)).unwrap();
    attempt.await.unwrap();
    assert_eq!(operation.result(), Some(1));

    let (tx, rx) = oneshot::channel();
    let attempt = operation.invoke(rx);
    assert!(operation.result().is_none(), "invoke clears the old result");
    tx.send(Err("rejected".to_string())).unwrap();
    assert!(attempt.await.is_err());
    assert!(operation.result().is_none());
    assert_eq!(operation.status(), OperationStatus::Failed);
}

#[tokio::test]
async fn test_retry_after_failure_clears_error() {
    let operation = gated();

    let (tx, rx) = oneshot::channel();
    let attempt = operation.invoke(rx);
    tx.send(Err("flaky".to_string())).unwrap();
    assert!(attempt.await.is_err());

    let (tx, rx) = oneshot::channel();
    let attempt = operation.invoke(rx);
    assert!(operation.error().is_none());
    assert_eq!(operation.status(), OperationStatus::Pending);
    tx.send(Ok(7)).unwrap();
    assert_eq!(attempt.await.unwrap(), 7);
    assert_eq!(operation.status(), OperationStatus::Succeeded);
}

#[tokio::test]
async fn test_reset_from_every_state() {
    let operation = gated();
    operation.reset();
    assert_eq!(operation.status(), OperationStatus::Idle);

    // Pending
    let (_tx, rx) = oneshot::channel();
    let _attempt = operation.invoke(rx);
    operation.reset();
    assert_eq!(operation.status(), OperationStatus::Idle);

    // Succeeded
    let (tx, rx) = oneshot::channel();
    let attempt = operation.invoke(rx);
    tx.send(Ok(3)).unwrap();
    attempt.await.unwrap();
    operation.reset();
    assert_eq!(operation.status(), OperationStatus::Idle);
    assert!(operation.result().is_none());

    // Failed
    let (tx, rx) = oneshot::channel();
    let attempt = operation.invoke(rx);
    tx.send(Err("no".to_string())).unwrap();
    assert!(attempt.await.is_err());
    operation.reset();
    assert_eq!(operation.status(), OperationStatus::Idle);
    assert!(operation.error().is_none());
}

/// The later invocation wins even though it settles first; the earlier one
/// still resolves for its own caller but leaves the state alone.
#[tokio::test]
async fn test_race_keeps_latest_invocation() {
    let operation = gated();
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();

    let first = operation.invoke(first_rx);
    let second = operation.invoke(second_rx);

    second_tx.send(Ok(2)).unwrap();
    assert_eq!(second.await.unwrap(), 2);
    assert_eq!(operation.result(), Some(2));

    first_tx.send(Ok(1)).unwrap();
    assert_eq!(first.await.unwrap(), 1);
    assert_eq!(operation.status(), OperationStatus::Succeeded);
    assert_eq!(operation.result(), Some(2), "stale settlement must be discarded");
}

#[tokio::test]
async fn test_stale_failure_does_not_overwrite_success() {
    let operation = gated();
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();

    let first = operation.invoke(first_rx);
    let second = operation.invoke(second_rx);

    second_tx.send(Ok(10)).unwrap();
    second.await.unwrap();
    first_tx.send(Err("late failure".to_string())).unwrap();

    let error = first.await.unwrap_err();
    assert_eq!(error.message(), "late failure");
    assert_eq!(operation.status(), OperationStatus::Succeeded);
    assert_eq!(operation.result(), Some(10));
}

#[tokio::test]
async fn test_settlement_after_reset_is_discarded() {
    let operation = gated();
    let (tx, rx) = oneshot::channel();

    let attempt = operation.invoke(rx);
    operation.reset();
    tx.send(Ok(5)).unwrap();

    assert_eq!(attempt.await.unwrap(), 5);
    assert_eq!(operation.status(), OperationStatus::Idle);
}

#[tokio::test]
async fn test_concurrent_invocations_are_not_deduplicated() {
    let calls = Arc::new(Mutex::new(0u32));
    let counter = calls.clone();
    let operation = Operation::new(move |value: u32| {
        *counter.lock().unwrap() += 1;
        async move { Ok::<_, io::Error>(value) }
    });

    let (a, b) = tokio::join!(operation.invoke(1), operation.invoke(2));
    assert_eq!((a.unwrap(), b.unwrap()), (1, 2));
    assert_eq!(*calls.lock().unwrap(), 2);
    assert_eq!(operation.result(), Some(2));
}

#[tokio::test]
async fn test_observer_notified_once_per_failure() {
    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let log = events.clone();

    let operation = Operation::builder(|fail: bool| async move {
        if fail {
            Err(io::Error::new(io::ErrorKind::Other, "save failed"))
        } else {
            Ok("saved".to_string())
        }
    })
    .name("save-entry")
    .observe(move |event: &OperationEvent<'_, String>| {
        let line = match event {
            OperationEvent::Started => "started".to_string(),
            OperationEvent::Succeeded(result) => format!("succeeded:{}", result),
            OperationEvent::Failed(error) => format!("failed:{}", error.message()),
            OperationEvent::Reset => "reset".to_string(),
        };
        log.lock().unwrap().push(line);
    })
    .build()
    .unwrap();

    assert!(operation.invoke(true).await.is_err());
    // Repeated reads do not produce more notifications.
    for _ in 0..3 {
        assert_eq!(operation.status(), OperationStatus::Failed);
    }
    operation.invoke(false).await.unwrap();
    operation.reset();

    assert_eq!(
        *events.lock().unwrap(),
        [
            "started",
            "failed:save failed",
            "started",
            "succeeded:saved",
            "reset"
        ]
    );
}

#[tokio::test]
async fn test_auto_start_begins_pending_and_settles() {
    let operation = Operation::builder(|value: u32| async move { Ok::<_, io::Error>(value * 10) })
        .auto_start(4)
        .build()
        .unwrap();

    assert_eq!(operation.status(), OperationStatus::Pending);

    let handle = operation.take_auto_start().expect("auto-start handle");
    assert!(operation.take_auto_start().is_none());
    assert_eq!(handle.await.unwrap().unwrap(), 40);
    assert_eq!(operation.status(), OperationStatus::Succeeded);
    assert_eq!(operation.result(), Some(40));
}

#[tokio::test]
async fn test_without_auto_start_operation_is_idle() {
    let operation = Operation::builder(|value: u32| async move { Ok::<_, io::Error>(value) })
        .build()
        .unwrap();
    assert_eq!(operation.status(), OperationStatus::Idle);
    assert!(operation.take_auto_start().is_none());
}

#[test]
fn test_auto_start_requires_runtime() {
    let result = Operation::builder(|value: u32| async move { Ok::<_, io::Error>(value) })
        .auto_start(1)
        .build();
    assert!(matches!(result, Err(AppError::Runtime(_))));
}

#[tokio::test]
async fn test_timeout_fails_slow_action() {
    let operation = Operation::builder(|delay_ms: u64| async move {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        Ok::<_, io::Error>(delay_ms)
    })
    .timeout(Duration::from_millis(20))
    .build()
    .unwrap();

    let error: ActionError = operation.invoke(2_000).await.unwrap_err();
    assert!(error.message().contains("timed out"));
    assert_eq!(operation.status(), OperationStatus::Failed);

    assert_eq!(operation.invoke(0).await.unwrap(), 0);
    assert_eq!(operation.status(), OperationStatus::Succeeded);
}

#[tokio::test]
async fn test_settlement_after_drop_is_ignored() {
    let operation = gated();
    let (tx, rx) = oneshot::channel();
    let attempt = operation.invoke(rx);
    drop(operation);

    tx.send(Ok(9)).unwrap();
    assert_eq!(attempt.await.unwrap(), 9);
}

#[tokio::test]
async fn test_invoke_future_can_be_spawned() {
    let operation = gated();
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(operation.invoke(rx));

    tx.send(Ok(11)).unwrap();
    assert_eq!(handle.await.unwrap().unwrap(), 11);
    assert_eq!(operation.result(), Some(11));
}
