//! Delivery runner - runs each dispatch on its own task
//!
//! Two entry points share one task body:
//! - [`DeliveryRunner::send_blocking`] waits for the result, bounded by a timeout
//! - [`DeliveryRunner::send_async`] returns a [`DeliveryHandle`] immediately
//!
//! # Timeouts
//!
//! A timed-out delivery is abandoned, not cancelled. The task keeps running
//! in the background and any external process it started (notify-send,
//! PowerShell, the macOS helper) is left to finish on its own. Callers that
//! issue many sends against a hung notification service will accumulate
//! these processes until they exit.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};

use crate::domain::NotificationRequest;

use super::dispatcher::{Dispatcher, NotifyError};
use super::ports::{LogSink, NotificationError};

/// How long [`DeliveryRunner::send_blocking`] waits by default
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(35);

/// Spawns one task per delivery
#[derive(Clone)]
pub struct DeliveryRunner {
    dispatcher: Arc<Dispatcher>,
    log: Arc<dyn LogSink>,
}

impl DeliveryRunner {
    pub fn new(dispatcher: Arc<Dispatcher>, log: Arc<dyn LogSink>) -> Self {
        Self { dispatcher, log }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Deliver and wait for the outcome.
    ///
    /// Returns `Ok(false)` if the delivery does not finish within `timeout`.
    pub async fn send_blocking(
        &self,
        request: NotificationRequest,
        timeout: Duration,
    ) -> Result<bool, NotifyError> {
        self.send_async(request).wait_timeout(timeout).await
    }

    /// Start a delivery and return without waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send_async(&self, request: NotificationRequest) -> DeliveryHandle {
        let dispatcher = Arc::clone(&self.dispatcher);
        let task = tokio::spawn(async move { dispatcher.dispatch(&request).await });

        DeliveryHandle {
            task,
            log: Arc::clone(&self.log),
        }
    }
}

/// An in-flight delivery. Consumed by waiting on it.
pub struct DeliveryHandle {
    task: JoinHandle<Result<bool, NotifyError>>,
    log: Arc<dyn LogSink>,
}

impl DeliveryHandle {
    /// Whether the delivery task has completed
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait until the delivery completes
    pub async fn wait(self) -> Result<bool, NotifyError> {
        let joined = self.task.await;
        Self::settle(joined, self.log.as_ref())
    }

    /// Wait at most `timeout`. On expiry the task is detached and `Ok(false)` returned.
    pub async fn wait_timeout(self, timeout: Duration) -> Result<bool, NotifyError> {
        let DeliveryHandle { task, log } = self;

        match tokio::time::timeout(timeout, task).await {
            Ok(joined) => Self::settle(joined, log.as_ref()),
            Err(_) => {
                log.warn(&format!(
                    "Notification did not complete within {:?}; leaving it running",
                    timeout
                ));
                Ok(false)
            }
        }
    }

    fn settle(
        joined: Result<Result<bool, NotifyError>, JoinError>,
        log: &dyn LogSink,
    ) -> Result<bool, NotifyError> {
        match joined {
            Ok(result) => result,
            Err(e) => {
                log.error(&format!("Exception in running notification task: {}", e));
                Err(NotifyError::NotificationFailure(
                    NotificationError::TaskFailed(e.to_string()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::NotifierCapability;
    use crate::infrastructure::logging::NoOpLogSink;

    struct Counting {
        delay: Duration,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NotifierCapability for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        async fn send(&self, _request: &NotificationRequest) -> Result<bool, NotificationError> {
            tokio::time::sleep(self.delay).await;
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    struct Panicking;

    #[async_trait]
    impl NotifierCapability for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn send(&self, _request: &NotificationRequest) -> Result<bool, NotificationError> {
            panic!("strategy blew up");
        }
    }

    fn runner(strategy: Arc<dyn NotifierCapability>) -> DeliveryRunner {
        let log: Arc<dyn LogSink> = Arc::new(NoOpLogSink::new());
        let dispatcher = Dispatcher::new(None, strategy, Arc::clone(&log));
        DeliveryRunner::new(Arc::new(dispatcher), log)
    }

    fn counting(delay: Duration) -> Arc<Counting> {
        Arc::new(Counting {
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn blocking_send_returns_strategy_result() {
        let strategy = counting(Duration::ZERO);
        let runner = runner(strategy.clone());

        let sent = runner
            .send_blocking(NotificationRequest::default(), DEFAULT_SEND_TIMEOUT)
            .await
            .unwrap();
        assert!(sent);
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_sends_are_independent() {
        let strategy = counting(Duration::ZERO);
        let runner = runner(strategy.clone());
        let request = NotificationRequest::default();

        assert!(runner
            .send_blocking(request.clone(), DEFAULT_SEND_TIMEOUT)
            .await
            .unwrap());
        assert!(runner
            .send_blocking(request, DEFAULT_SEND_TIMEOUT)
            .await
            .unwrap());
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn async_send_matches_blocking_result() {
        let strategy = counting(Duration::from_millis(20));
        let runner = runner(strategy.clone());

        let handle = runner.send_async(NotificationRequest::default());
        assert!(handle.wait().await.unwrap());
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn timeout_returns_false_and_leaves_task_running() {
        let strategy = counting(Duration::from_millis(200));
        let runner = runner(strategy.clone());

        let sent = runner
            .send_blocking(NotificationRequest::default(), Duration::from_millis(10))
            .await
            .unwrap();
        assert!(!sent);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panicking_strategy_surfaces_as_failure() {
        let runner = runner(Arc::new(Panicking));

        let err = runner
            .send_blocking(NotificationRequest::default(), DEFAULT_SEND_TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NotifyError::NotificationFailure(NotificationError::TaskFailed(_))
        ));
    }

    #[tokio::test]
    async fn handle_reports_completion() {
        let runner = runner(counting(Duration::ZERO));
        let handle = runner.send_async(NotificationRequest::default());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished());
        assert!(handle.wait().await.unwrap());
    }
}
