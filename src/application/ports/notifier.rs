//! Notifier port interface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::NotificationRequest;

/// Errors raised at the strategy boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Required binary not found: {0}")]
    BinaryNotFound(String),

    #[error("Failed to launch {program}: {message}")]
    LaunchFailed { program: String, message: String },

    #[error("Session bus error: {0}")]
    Bus(String),

    #[error("Failed to prepare toast script: {0}")]
    Script(String),

    #[error("Notification task failed: {0}")]
    TaskFailed(String),
}

/// Contract every platform delivery strategy implements.
///
/// `send` returns `Ok(true)` only when the foreground delivery action
/// succeeded, `Ok(false)` for expected failures (non-zero exit status,
/// unreachable bus) and `Err` for anything unexpected.
#[async_trait]
pub trait NotifierCapability: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Deliver one notification.
    ///
    /// # Arguments
    /// * `request` - The notification to show
    async fn send(&self, request: &NotificationRequest) -> Result<bool, NotificationError>;
}

#[async_trait]
impl NotifierCapability for Box<dyn NotifierCapability> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    async fn send(&self, request: &NotificationRequest) -> Result<bool, NotificationError> {
        self.as_ref().send(request).await
    }
}

#[async_trait]
impl NotifierCapability for Arc<dyn NotifierCapability> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    async fn send(&self, request: &NotificationRequest) -> Result<bool, NotificationError> {
        self.as_ref().send(request).await
    }
}
