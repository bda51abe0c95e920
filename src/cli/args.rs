//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::{AppConfig, LinuxConfig, MacosConfig, WindowsConfig};
use crate::domain::{StrategyKind, Urgency};

/// Environment variable that turns on logging
pub const ENABLE_LOGGING_ENV: &str = "NOTIFY_DISPATCH_ENABLE_LOGGING";

/// notify-dispatch - send a native desktop notification
#[derive(Parser, Debug)]
#[command(name = "notify-dispatch")]
#[command(version)]
#[command(about = "Send native desktop notifications on Linux, macOS and Windows")]
#[command(long_about = None)]
pub struct Cli {
    /// Notification title
    #[arg(short = 't', long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Notification body
    #[arg(short = 'm', long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Application name shown by the notification server
    #[arg(short = 'a', long, value_name = "NAME")]
    pub application_name: Option<String>,

    /// Icon image (absolute, or relative to the resource directory)
    #[arg(short = 'i', long, value_name = "PATH")]
    pub icon: Option<String>,

    /// Custom sound, must be a .wav file
    #[arg(short = 's', long, value_name = "PATH")]
    pub audio: Option<String>,

    /// Urgency level (honoured by notify-send)
    #[arg(long, value_name = "LEVEL")]
    pub urgency: Option<UrgencyArg>,

    /// Override platform detection (Windows, Darwin, Linux)
    #[arg(long, value_name = "NAME")]
    pub platform: Option<String>,

    /// Force a delivery strategy
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<StrategyArg>,

    /// Linux: use notify-send instead of the session bus
    #[arg(long)]
    pub legacy: bool,

    /// Linux: do not retry through notify-send when the bus call fails
    #[arg(long)]
    pub no_fallback: bool,

    /// Skip the Windows version check
    #[arg(long)]
    pub bypass_version_check: bool,

    /// macOS: custom Notificator.app bundle
    #[arg(long, value_name = "PATH")]
    pub notificator: Option<PathBuf>,

    /// Seconds to wait for delivery
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Return as soon as delivery has started
    #[arg(long)]
    pub no_wait: bool,

    /// Write diagnostics to stderr
    #[arg(long)]
    pub enable_logging: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config layer contributed by command-line flags.
    /// Flags that were not given leave the field unset.
    pub fn to_config(&self) -> AppConfig {
        let linux = if self.legacy || self.no_fallback {
            Some(LinuxConfig {
                legacy: self.legacy.then_some(true),
                fallback: self.no_fallback.then_some(false),
            })
        } else {
            None
        };

        AppConfig {
            application_name: self.application_name.clone(),
            icon: self.icon.clone(),
            audio: self.audio.clone(),
            urgency: self.urgency.map(|u| Urgency::from(u).to_string()),
            platform: self.platform.clone(),
            strategy: self.strategy.map(|s| StrategyKind::from(s).to_string()),
            enable_logging: self.enable_logging.then_some(true),
            timeout_secs: self.timeout,
            linux,
            windows: self.bypass_version_check.then_some(WindowsConfig {
                bypass_version_check: Some(true),
            }),
            macos: self.notificator.as_ref().map(|path| MacosConfig {
                notificator: Some(path.to_string_lossy().into_owned()),
            }),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Urgency argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum UrgencyArg {
    Low,
    Normal,
    Critical,
}

impl From<UrgencyArg> for Urgency {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Low => Urgency::Low,
            UrgencyArg::Normal => Urgency::Normal,
            UrgencyArg::Critical => Urgency::Critical,
        }
    }
}

/// Strategy argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    LinuxBinary,
    LinuxBus,
    MacHelper,
    WindowsToast,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::LinuxBinary => StrategyKind::LinuxBinary,
            StrategyArg::LinuxBus => StrategyKind::LinuxBus,
            StrategyArg::MacHelper => StrategyKind::MacHelper,
            StrategyArg::WindowsToast => StrategyKind::WindowsToast,
        }
    }
}

/// Parsed send options (config already merged)
#[derive(Debug, Clone)]
pub struct SendOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    pub no_wait: bool,
    pub config: AppConfig,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "application_name",
    "icon",
    "audio",
    "urgency",
    "platform",
    "strategy",
    "enable_logging",
    "timeout_secs",
    "linux.legacy",
    "linux.fallback",
    "windows.bypass_version_check",
    "macos.notificator",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
