//! Strategy selection and dispatcher construction

use std::sync::Arc;

use crate::application::ports::{LogSink, NotificationError, NotifierCapability};
use crate::application::{detect_platform, DispatchOptions, Dispatcher, NotifyError};
use crate::domain::error::UnsupportedPlatformError;
use crate::domain::{Capabilities, PlatformId, StrategyKind};
use crate::infrastructure::platform::probe_capabilities;

#[cfg(feature = "dbus")]
use super::dbus::DbusNotifier;
use super::notificator::NotificatorNotifier;
use super::notify_send::NotifySendNotifier;
use super::toast::ToastNotifier;

/// Oldest Windows release with the toast API
pub const MIN_WINDOWS_VERSION: u32 = 10;

/// Pick the strategy kind used when none is forced
pub fn default_strategy(
    platform: PlatformId,
    options: &DispatchOptions,
    caps: &Capabilities,
) -> StrategyKind {
    match platform {
        PlatformId::Linux if options.legacy || !caps.bus_library => StrategyKind::LinuxBinary,
        PlatformId::Linux => StrategyKind::LinuxBus,
        PlatformId::Darwin => StrategyKind::MacHelper,
        PlatformId::Windows => StrategyKind::WindowsToast,
    }
}

/// Choose and construct the strategy for `platform`
pub fn select_strategy(
    platform: PlatformId,
    options: &DispatchOptions,
    caps: &Capabilities,
    log: Arc<dyn LogSink>,
) -> Result<Arc<dyn NotifierCapability>, NotifyError> {
    if platform == PlatformId::Windows && !options.bypass_version_check {
        check_windows_version(caps)?;
    }

    let kind = match options.strategy {
        Some(kind) if kind.platform() != platform => {
            return Err(NotifyError::InvalidArgument(format!(
                "strategy '{}' cannot run on {}",
                kind, platform
            )));
        }
        Some(kind) => kind,
        None => default_strategy(platform, options, caps),
    };

    log.debug(&format!("Selected {} notifier for {}", kind, platform));
    build_strategy(kind, options, caps, log).map_err(|e| match e {
        NotificationError::BinaryNotFound(name) => NotifyError::BinaryNotFound(name),
        other => NotifyError::NotificationFailure(other),
    })
}

fn check_windows_version(caps: &Capabilities) -> Result<(), UnsupportedPlatformError> {
    // a version reported by a non-Windows host says nothing about toast support
    let version = match caps.host {
        Some(PlatformId::Windows) => caps.os_major_version,
        _ => None,
    };

    match version {
        Some(major) if major >= MIN_WINDOWS_VERSION => Ok(()),
        Some(major) => Err(UnsupportedPlatformError::new(format!(
            "Windows {} detected; toast notifications need Windows {} or later",
            major, MIN_WINDOWS_VERSION
        ))),
        None => Err(UnsupportedPlatformError::new(
            "unable to verify Windows version; toast notifications need Windows 10 or later",
        )),
    }
}

fn build_strategy(
    kind: StrategyKind,
    options: &DispatchOptions,
    caps: &Capabilities,
    log: Arc<dyn LogSink>,
) -> Result<Arc<dyn NotifierCapability>, NotificationError> {
    match kind {
        StrategyKind::LinuxBinary => Ok(Arc::new(NotifySendNotifier::from_capabilities(
            caps, log,
        )?)),
        StrategyKind::LinuxBus => build_bus_strategy(options, caps, log),
        StrategyKind::MacHelper => Ok(Arc::new(NotificatorNotifier::from_capabilities(
            caps,
            options.resource_root.as_deref(),
            options.custom_notificator.as_deref(),
            log,
        )?)),
        StrategyKind::WindowsToast => Ok(Arc::new(ToastNotifier::from_capabilities(caps, log)?)),
    }
}

#[cfg(feature = "dbus")]
fn build_bus_strategy(
    options: &DispatchOptions,
    caps: &Capabilities,
    log: Arc<dyn LogSink>,
) -> Result<Arc<dyn NotifierCapability>, NotificationError> {
    let mut notifier = DbusNotifier::from_capabilities(caps, options.fallback, log);
    if let Some(address) = &options.bus_address {
        notifier = notifier.with_address(address.clone());
    }
    Ok(Arc::new(notifier))
}

#[cfg(not(feature = "dbus"))]
fn build_bus_strategy(
    _options: &DispatchOptions,
    caps: &Capabilities,
    log: Arc<dyn LogSink>,
) -> Result<Arc<dyn NotifierCapability>, NotificationError> {
    log.warn("Built without session bus support; using notify-send");
    Ok(Arc::new(NotifySendNotifier::from_capabilities(caps, log)?))
}

/// Build a dispatcher, probing the host for capabilities
pub fn create_dispatcher(
    options: &DispatchOptions,
    log: Arc<dyn LogSink>,
) -> Result<Dispatcher, NotifyError> {
    if options.custom.is_some() {
        return create_dispatcher_with(options, &Capabilities::default(), log);
    }
    create_dispatcher_with(options, &probe_capabilities(), log)
}

/// Build a dispatcher against already probed capabilities.
///
/// A custom strategy bypasses platform detection entirely.
pub fn create_dispatcher_with(
    options: &DispatchOptions,
    caps: &Capabilities,
    log: Arc<dyn LogSink>,
) -> Result<Dispatcher, NotifyError> {
    if let Some(custom) = &options.custom {
        if custom.name().trim().is_empty() {
            return Err(NotifyError::InvalidArgument(
                "custom notifier must report a non-empty name".to_string(),
            ));
        }
        log.debug(&format!("Using custom notifier {}", custom.name()));
        return Ok(Dispatcher::new(None, Arc::clone(custom), log));
    }

    let platform = detect_platform(
        options.platform_override.as_deref(),
        caps.host,
        options.bypass_version_check,
    )?;
    let strategy = select_strategy(platform, options, caps, Arc::clone(&log))?;

    Ok(Dispatcher::new(Some(platform), strategy, log))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::NotificationRequest;
    use crate::infrastructure::logging::NoOpLogSink;

    fn log() -> Arc<dyn LogSink> {
        Arc::new(NoOpLogSink::new())
    }

    fn linux_caps() -> Capabilities {
        Capabilities {
            host: Some(PlatformId::Linux),
            bus_library: true,
            notify_send: Some(PathBuf::from("/usr/bin/notify-send")),
            ..Default::default()
        }
    }

    fn windows_caps(version: u32) -> Capabilities {
        Capabilities {
            host: Some(PlatformId::Windows),
            os_major_version: Some(version),
            powershell: Some(PathBuf::from("C:\\Windows\\powershell.exe")),
            ..Default::default()
        }
    }

    struct Named(&'static str);

    #[async_trait]
    impl NotifierCapability for Named {
        fn name(&self) -> &str {
            self.0
        }

        async fn send(&self, _request: &NotificationRequest) -> Result<bool, NotificationError> {
            Ok(true)
        }
    }

    #[test]
    fn linux_defaults_to_bus() {
        let options = DispatchOptions::new();
        assert_eq!(
            default_strategy(PlatformId::Linux, &options, &linux_caps()),
            StrategyKind::LinuxBus
        );
    }

    #[test]
    fn linux_legacy_uses_binary() {
        let options = DispatchOptions {
            legacy: true,
            ..DispatchOptions::new()
        };
        assert_eq!(
            default_strategy(PlatformId::Linux, &options, &linux_caps()),
            StrategyKind::LinuxBinary
        );
    }

    #[test]
    fn linux_without_bus_library_uses_binary() {
        let caps = Capabilities {
            bus_library: false,
            ..linux_caps()
        };
        assert_eq!(
            default_strategy(PlatformId::Linux, &DispatchOptions::new(), &caps),
            StrategyKind::LinuxBinary
        );
    }

    #[test]
    fn legacy_without_notify_send_is_binary_not_found() {
        let caps = Capabilities {
            notify_send: None,
            ..linux_caps()
        };
        let options = DispatchOptions {
            legacy: true,
            ..DispatchOptions::new()
        };
        let err = create_dispatcher_with(&options, &caps, log()).unwrap_err();
        assert_eq!(err, NotifyError::BinaryNotFound("notify-send".to_string()));
    }

    #[test]
    fn legacy_linux_dispatcher() {
        let options = DispatchOptions {
            legacy: true,
            ..DispatchOptions::new()
        };
        let dispatcher = create_dispatcher_with(&options, &linux_caps(), log()).unwrap();
        assert_eq!(dispatcher.platform(), Some(PlatformId::Linux));
        assert_eq!(dispatcher.strategy_name(), "linux-binary");
    }

    #[cfg(feature = "dbus")]
    #[test]
    fn default_linux_dispatcher_uses_bus() {
        let dispatcher =
            create_dispatcher_with(&DispatchOptions::new(), &linux_caps(), log()).unwrap();
        assert_eq!(dispatcher.strategy_name(), "linux-bus");
    }

    #[test]
    fn windows_10_is_accepted() {
        let dispatcher =
            create_dispatcher_with(&DispatchOptions::new(), &windows_caps(10), log()).unwrap();
        assert_eq!(dispatcher.platform(), Some(PlatformId::Windows));
        assert_eq!(dispatcher.strategy_name(), "windows-toast");
    }

    #[test]
    fn old_windows_is_unsupported() {
        let err =
            create_dispatcher_with(&DispatchOptions::new(), &windows_caps(7), log()).unwrap_err();
        assert!(matches!(err, NotifyError::UnsupportedPlatform(_)));
    }

    #[test]
    fn old_windows_with_bypass() {
        let options = DispatchOptions {
            bypass_version_check: true,
            ..DispatchOptions::new()
        };
        assert!(create_dispatcher_with(&options, &windows_caps(7), log()).is_ok());
    }

    #[test]
    fn windows_override_on_other_host_needs_bypass() {
        let caps = Capabilities {
            powershell: Some(PathBuf::from("/usr/bin/pwsh")),
            ..linux_caps()
        };
        let options = DispatchOptions {
            platform_override: Some("Windows".to_string()),
            ..DispatchOptions::new()
        };
        let err = create_dispatcher_with(&options, &caps, log()).unwrap_err();
        assert!(matches!(err, NotifyError::UnsupportedPlatform(_)));

        let options = DispatchOptions {
            bypass_version_check: true,
            ..options
        };
        let dispatcher = create_dispatcher_with(&options, &caps, log()).unwrap();
        assert_eq!(dispatcher.platform(), Some(PlatformId::Windows));
    }

    #[test]
    fn platform_override_wins_over_host() {
        let options = DispatchOptions {
            platform_override: Some("Linux".to_string()),
            legacy: true,
            ..DispatchOptions::new()
        };
        let caps = Capabilities {
            host: Some(PlatformId::Darwin),
            ..linux_caps()
        };
        let dispatcher = create_dispatcher_with(&options, &caps, log()).unwrap();
        assert_eq!(dispatcher.platform(), Some(PlatformId::Linux));
    }

    #[test]
    fn unsupported_override_fails() {
        let options = DispatchOptions {
            platform_override: Some("Haiku".to_string()),
            ..DispatchOptions::new()
        };
        let err = create_dispatcher_with(&options, &linux_caps(), log()).unwrap_err();
        assert!(matches!(err, NotifyError::UnsupportedPlatform(_)));
    }

    #[test]
    fn unknown_host_fails() {
        let caps = Capabilities {
            host: None,
            ..linux_caps()
        };
        let err = create_dispatcher_with(&DispatchOptions::new(), &caps, log()).unwrap_err();
        assert!(matches!(err, NotifyError::UnsupportedPlatform(_)));
    }

    #[test]
    fn forced_strategy_must_match_platform() {
        let options = DispatchOptions {
            strategy: Some(StrategyKind::MacHelper),
            ..DispatchOptions::new()
        };
        let err = create_dispatcher_with(&options, &linux_caps(), log()).unwrap_err();
        assert!(matches!(err, NotifyError::InvalidArgument(_)));
    }

    #[test]
    fn forced_strategy_is_used() {
        let options = DispatchOptions {
            strategy: Some(StrategyKind::LinuxBinary),
            ..DispatchOptions::new()
        };
        let dispatcher = create_dispatcher_with(&options, &linux_caps(), log()).unwrap();
        assert_eq!(dispatcher.strategy_name(), "linux-binary");
    }

    #[test]
    fn mac_without_helper_is_binary_not_found() {
        let caps = Capabilities {
            host: Some(PlatformId::Darwin),
            ..Default::default()
        };
        let err = create_dispatcher_with(&DispatchOptions::new(), &caps, log()).unwrap_err();
        assert!(matches!(err, NotifyError::BinaryNotFound(_)));
    }

    #[test]
    fn custom_strategy_bypasses_detection() {
        let options = DispatchOptions {
            custom: Some(Arc::new(Named("custom"))),
            platform_override: Some("Haiku".to_string()),
            ..DispatchOptions::new()
        };
        let dispatcher =
            create_dispatcher_with(&options, &Capabilities::default(), log()).unwrap();
        assert_eq!(dispatcher.platform(), None);
        assert_eq!(dispatcher.strategy_name(), "custom");
    }

    #[test]
    fn nameless_custom_strategy_is_rejected() {
        let options = DispatchOptions {
            custom: Some(Arc::new(Named("  "))),
            ..DispatchOptions::new()
        };
        let err = create_dispatcher(&options, log()).unwrap_err();
        assert!(matches!(err, NotifyError::InvalidArgument(_)));
    }
}
