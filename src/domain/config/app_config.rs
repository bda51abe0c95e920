//! Application configuration value object

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::request::{Urgency, DEFAULT_APPLICATION_NAME};

/// Default bound on how long a blocking send waits
pub const DEFAULT_TIMEOUT_SECS: u64 = 35;

/// Linux-specific configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinuxConfig {
    /// Use notify-send instead of the session bus
    pub legacy: Option<bool>,
    /// Retry through notify-send when the bus call fails
    pub fallback: Option<bool>,
}

/// Windows-specific configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsConfig {
    pub bypass_version_check: Option<bool>,
}

/// macOS-specific configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacosConfig {
    /// Path to a custom Notificator.app bundle
    pub notificator: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub application_name: Option<String>,
    pub icon: Option<String>,
    pub audio: Option<String>,
    pub urgency: Option<String>,
    pub platform: Option<String>,
    pub strategy: Option<String>,
    pub enable_logging: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub linux: Option<LinuxConfig>,
    pub windows: Option<WindowsConfig>,
    pub macos: Option<MacosConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            application_name: Some(DEFAULT_APPLICATION_NAME.to_string()),
            icon: None,
            audio: None,
            urgency: Some(Urgency::Normal.to_string()),
            platform: None,
            strategy: None,
            enable_logging: Some(false),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            linux: Some(LinuxConfig {
                legacy: Some(false),
                fallback: Some(true),
            }),
            windows: Some(WindowsConfig {
                bypass_version_check: Some(false),
            }),
            macos: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            application_name: other.application_name.or(self.application_name),
            icon: other.icon.or(self.icon),
            audio: other.audio.or(self.audio),
            urgency: other.urgency.or(self.urgency),
            platform: other.platform.or(self.platform),
            strategy: other.strategy.or(self.strategy),
            enable_logging: other.enable_logging.or(self.enable_logging),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            linux: merge_section(self.linux, other.linux, |b, o| LinuxConfig {
                legacy: o.legacy.or(b.legacy),
                fallback: o.fallback.or(b.fallback),
            }),
            windows: merge_section(self.windows, other.windows, |b, o| WindowsConfig {
                bypass_version_check: o.bypass_version_check.or(b.bypass_version_check),
            }),
            macos: merge_section(self.macos, other.macos, |b, o| MacosConfig {
                notificator: o.notificator.or(b.notificator),
            }),
        }
    }

    /// Get urgency as parsed Urgency, or default if not set/invalid
    pub fn urgency_or_default(&self) -> Urgency {
        self.urgency
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get logging setting, or false if not set
    pub fn enable_logging_or_default(&self) -> bool {
        self.enable_logging.unwrap_or(false)
    }

    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn application_name_or_default(&self) -> &str {
        self.application_name
            .as_deref()
            .unwrap_or(DEFAULT_APPLICATION_NAME)
    }

    /// Get legacy (notify-send) setting, or false if not set
    pub fn legacy_or_default(&self) -> bool {
        self.linux.as_ref().and_then(|l| l.legacy).unwrap_or(false)
    }

    /// Get bus fallback setting, or true if not set
    pub fn fallback_or_default(&self) -> bool {
        self.linux.as_ref().and_then(|l| l.fallback).unwrap_or(true)
    }

    pub fn bypass_version_check_or_default(&self) -> bool {
        self.windows
            .as_ref()
            .and_then(|w| w.bypass_version_check)
            .unwrap_or(false)
    }

    pub fn notificator(&self) -> Option<&str> {
        self.macos.as_ref().and_then(|m| m.notificator.as_deref())
    }
}

fn merge_section<T>(base: Option<T>, other: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (base, other) {
        (None, None) => None,
        (Some(b), None) => Some(b),
        (None, Some(o)) => Some(o),
        (Some(b), Some(o)) => Some(merge(b, o)),
    }
}
