//! `Notify` - the caller-facing facade
//!
//! Holds one notification request plus the dispatcher chosen for this host.
//! Icon and audio references are validated when they are set, so a bad
//! path is reported before anything is sent.
//!
//! ```no_run
//! # async fn demo() -> Result<(), notify_dispatch::NotifyError> {
//! use notify_dispatch::Notify;
//!
//! let mut notify = Notify::builder()
//!     .title("Build finished")
//!     .message("All 312 tests passed")
//!     .application_name("ci-watch")
//!     .build()?;
//!
//! notify.set_audio("done.wav")?;
//! let delivered = notify.send().await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LogSink, NotifierCapability};
use crate::application::{
    DeliveryHandle, DeliveryRunner, DispatchOptions, NotifyError, DEFAULT_SEND_TIMEOUT,
};
use crate::domain::config::AppConfig;
use crate::domain::request::{DEFAULT_APPLICATION_NAME, DEFAULT_MESSAGE, DEFAULT_TITLE};
use crate::domain::{NotificationRequest, PathResolver, PlatformId, StrategyKind, Urgency};
use crate::infrastructure::logging::NoOpLogSink;
use crate::infrastructure::notification::create_dispatcher;

/// Icon used when none is given, looked up under the resource root
pub const DEFAULT_ICON: &str = "icon.png";

/// Builder for [`Notify`]
pub struct NotifyBuilder {
    title: String,
    message: String,
    application_name: String,
    icon: Option<PathBuf>,
    audio: Option<PathBuf>,
    urgency: Urgency,
    options: DispatchOptions,
    log: Arc<dyn LogSink>,
    timeout: Duration,
}

impl NotifyBuilder {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            icon: None,
            audio: None,
            urgency: Urgency::default(),
            options: DispatchOptions::new(),
            log: Arc::new(NoOpLogSink::new()),
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Start from a merged [`AppConfig`]
    pub fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        let mut builder = Self::new()
            .application_name(config.application_name_or_default())
            .legacy(config.legacy_or_default())
            .fallback(config.fallback_or_default())
            .bypass_version_check(config.bypass_version_check_or_default())
            .timeout(config.timeout_or_default());

        if let Some(urgency) = &config.urgency {
            let urgency = urgency
                .parse::<Urgency>()
                .map_err(|e| NotifyError::InvalidArgument(e.to_string()))?;
            builder = builder.urgency(urgency);
        }
        if let Some(strategy) = &config.strategy {
            let kind = strategy
                .parse::<StrategyKind>()
                .map_err(|e| NotifyError::InvalidArgument(e.to_string()))?;
            builder = builder.strategy(kind);
        }
        if let Some(platform) = &config.platform {
            builder = builder.platform(platform.clone());
        }
        if let Some(icon) = &config.icon {
            builder = builder.icon(icon);
        }
        if let Some(audio) = &config.audio {
            builder = builder.audio(audio);
        }
        if let Some(notificator) = config.notificator() {
            builder = builder.custom_notificator(notificator);
        }

        Ok(builder)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = application_name.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<PathBuf>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Custom `.wav` sound played alongside the notification
    pub fn audio(mut self, audio: impl Into<PathBuf>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Override platform detection (Windows, Darwin, Linux)
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.options.platform_override = Some(platform.into());
        self
    }

    pub fn strategy(mut self, kind: StrategyKind) -> Self {
        self.options.strategy = Some(kind);
        self
    }

    /// Use a caller-supplied strategy, skipping platform detection
    pub fn custom_notifier(mut self, notifier: Arc<dyn NotifierCapability>) -> Self {
        self.options.custom = Some(notifier);
        self
    }

    /// Linux: use notify-send instead of the session bus
    pub fn legacy(mut self, legacy: bool) -> Self {
        self.options.legacy = legacy;
        self
    }

    /// Linux: retry through notify-send when the bus call fails
    pub fn fallback(mut self, fallback: bool) -> Self {
        self.options.fallback = fallback;
        self
    }

    pub fn bypass_version_check(mut self, bypass: bool) -> Self {
        self.options.bypass_version_check = bypass;
        self
    }

    /// macOS: replacement Notificator.app bundle
    pub fn custom_notificator(mut self, bundle: impl Into<PathBuf>) -> Self {
        self.options.custom_notificator = Some(bundle.into());
        self
    }

    pub fn resource_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.resource_root = Some(root.into());
        self
    }

    pub fn bus_address(mut self, address: impl Into<String>) -> Self {
        self.options.bus_address = Some(address.into());
        self
    }

    pub fn log_sink(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }

    /// Bound on how long [`Notify::send`] waits
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate resources, select a strategy and build the facade
    pub fn build(mut self) -> Result<Notify, NotifyError> {
        if self.options.resource_root.is_none() {
            self.options.resource_root = PathResolver::default_resource_root();
        }
        let resolver = match &self.options.resource_root {
            Some(root) => PathResolver::with_resource_root(root),
            None => PathResolver::new(),
        };

        let mut request =
            NotificationRequest::new(self.title, self.message, self.application_name);
        request.set_urgency(self.urgency);

        match &self.icon {
            Some(icon) => request.set_icon(resolver.resolve_icon(icon)?),
            None => {
                if let Ok(icon) = resolver.resolve_icon(DEFAULT_ICON) {
                    request.set_icon(icon);
                }
            }
        }
        if let Some(audio) = &self.audio {
            request.set_audio(resolver.resolve_audio(audio)?);
        }

        let dispatcher = create_dispatcher(&self.options, Arc::clone(&self.log))?;
        let runner = DeliveryRunner::new(Arc::new(dispatcher), self.log);

        Ok(Notify {
            request,
            resolver,
            runner,
            timeout: self.timeout,
        })
    }
}

impl Default for NotifyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A notification ready to be sent, possibly more than once
pub struct Notify {
    request: NotificationRequest,
    resolver: PathResolver,
    runner: DeliveryRunner,
    timeout: Duration,
}

impl Notify {
    pub fn builder() -> NotifyBuilder {
        NotifyBuilder::new()
    }

    /// Defaults for everything, host platform detected
    pub fn new() -> Result<Self, NotifyError> {
        NotifyBuilder::new().build()
    }

    pub fn request(&self) -> &NotificationRequest {
        &self.request
    }

    pub fn title(&self) -> &str {
        self.request.title()
    }

    pub fn message(&self) -> &str {
        self.request.message()
    }

    pub fn application_name(&self) -> &str {
        self.request.application_name()
    }

    pub fn icon(&self) -> Option<&Path> {
        self.request.icon().map(|icon| icon.path())
    }

    pub fn audio(&self) -> Option<&Path> {
        self.request.audio().map(|audio| audio.path())
    }

    pub fn urgency(&self) -> Urgency {
        self.request.urgency()
    }

    /// Platform the dispatcher targets; `None` for a custom notifier
    pub fn platform(&self) -> Option<PlatformId> {
        self.runner.dispatcher().platform()
    }

    pub fn strategy_name(&self) -> &str {
        self.runner.dispatcher().strategy_name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.request.set_title(title);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.request.set_message(message);
    }

    pub fn set_application_name(&mut self, application_name: impl Into<String>) {
        self.request.set_application_name(application_name);
    }

    pub fn set_urgency(&mut self, urgency: Urgency) {
        self.request.set_urgency(urgency);
    }

    /// Validate and set the icon. On error the previous icon is kept.
    pub fn set_icon(&mut self, icon: impl AsRef<Path>) -> Result<(), NotifyError> {
        let icon = self.resolver.resolve_icon(icon)?;
        self.request.set_icon(icon);
        Ok(())
    }

    /// Validate and set custom audio. On error the previous audio is kept.
    pub fn set_audio(&mut self, audio: impl AsRef<Path>) -> Result<(), NotifyError> {
        let audio = self.resolver.resolve_audio(audio)?;
        self.request.set_audio(audio);
        Ok(())
    }

    pub fn clear_icon(&mut self) {
        self.request.clear_icon();
    }

    pub fn clear_audio(&mut self) {
        self.request.clear_audio();
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Send and wait for the outcome, bounded by the configured timeout.
    ///
    /// A timed-out send returns `Ok(false)`; see [`crate::application::delivery`]
    /// for what happens to the abandoned delivery.
    pub async fn send(&self) -> Result<bool, NotifyError> {
        self.runner
            .send_blocking(self.request.clone(), self.timeout)
            .await
    }

    /// Start sending and return immediately
    pub fn send_async(&self) -> DeliveryHandle {
        self.runner.send_async(self.request.clone())
    }
}
