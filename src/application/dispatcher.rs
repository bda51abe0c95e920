//! Dispatcher - routes a request to the selected platform strategy

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::error::{ConfigError, ResourceError, UnsupportedPlatformError};
use crate::domain::{NotificationRequest, PlatformId, StrategyKind};

use super::ports::{LogSink, NotificationError, NotifierCapability};

/// Caller-facing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    UnsupportedPlatform(#[from] UnsupportedPlatformError),

    #[error("Required binary not found: {0}")]
    BinaryNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notification failed: {0}")]
    NotificationFailure(#[source] NotificationError),
}

impl From<ConfigError> for NotifyError {
    fn from(e: ConfigError) -> Self {
        NotifyError::Config(e.to_string())
    }
}

/// Options consulted when choosing a strategy
#[derive(Clone)]
pub struct DispatchOptions {
    /// Platform name overriding host detection (Windows, Darwin, Linux)
    pub platform_override: Option<String>,
    /// Force a specific strategy by kind
    pub strategy: Option<StrategyKind>,
    /// Caller-supplied strategy; bypasses detection entirely
    pub custom: Option<Arc<dyn NotifierCapability>>,
    /// Linux: use notify-send instead of the session bus
    pub legacy: bool,
    /// Linux: retry through notify-send when the bus call fails
    pub fallback: bool,
    /// Accept old Windows versions and unknown platform overrides
    pub bypass_version_check: bool,
    /// macOS: replacement Notificator.app bundle
    pub custom_notificator: Option<PathBuf>,
    /// Root for bundled resources (helper binaries, default icon)
    pub resource_root: Option<PathBuf>,
    /// Session bus address; the user session bus when unset
    pub bus_address: Option<String>,
}

impl DispatchOptions {
    pub fn new() -> Self {
        Self {
            platform_override: None,
            strategy: None,
            custom: None,
            legacy: false,
            fallback: true,
            bypass_version_check: false,
            custom_notificator: None,
            resource_root: None,
            bus_address: None,
        }
    }
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DispatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchOptions")
            .field("platform_override", &self.platform_override)
            .field("strategy", &self.strategy)
            .field("custom", &self.custom.as_ref().map(|c| c.name().to_string()))
            .field("legacy", &self.legacy)
            .field("fallback", &self.fallback)
            .field("bypass_version_check", &self.bypass_version_check)
            .field("custom_notificator", &self.custom_notificator)
            .field("resource_root", &self.resource_root)
            .field("bus_address", &self.bus_address)
            .finish()
    }
}

/// Resolve which platform to notify on.
///
/// A recognised override always wins. An unrecognised override is an error
/// unless `bypass` is set, in which case host detection is used.
pub fn detect_platform(
    platform_override: Option<&str>,
    host: Option<PlatformId>,
    bypass: bool,
) -> Result<PlatformId, UnsupportedPlatformError> {
    if let Some(name) = platform_override {
        match name.parse::<PlatformId>() {
            Ok(platform) => return Ok(platform),
            Err(e) if !bypass => return Err(e),
            Err(_) => {}
        }
    }

    host.ok_or_else(|| {
        UnsupportedPlatformError::new(format!(
            "unable to detect platform ({})",
            std::env::consts::OS
        ))
    })
}

/// Holds the one strategy selected for this dispatcher's lifetime
pub struct Dispatcher {
    platform: Option<PlatformId>,
    strategy: Arc<dyn NotifierCapability>,
    log: Arc<dyn LogSink>,
}

impl Dispatcher {
    /// Create a dispatcher around an already selected strategy.
    ///
    /// `platform` is `None` for caller-supplied strategies.
    pub fn new(
        platform: Option<PlatformId>,
        strategy: Arc<dyn NotifierCapability>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            platform,
            strategy,
            log,
        }
    }

    pub fn platform(&self) -> Option<PlatformId> {
        self.platform
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Deliver through the selected strategy.
    ///
    /// Strategy errors are logged and surfaced as `NotificationFailure`.
    pub async fn dispatch(&self, request: &NotificationRequest) -> Result<bool, NotifyError> {
        let request = request.normalized();
        self.log.debug(&format!(
            "Dispatching notification through {}",
            self.strategy.name()
        ));

        match self.strategy.send(&request).await {
            Ok(true) => {
                self.log.info("Sent notification.");
                Ok(true)
            }
            Ok(false) => {
                self.log.warn("Unable to send notification.");
                Ok(false)
            }
            Err(e) => {
                self.log
                    .error(&format!("Exception on sending notification: {}", e));
                Err(NotifyError::NotificationFailure(e))
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("platform", &self.platform)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
