//! Platform identity and host capabilities

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::UnsupportedPlatformError;

/// Operating systems with a native notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformId {
    Windows,
    Darwin,
    Linux,
}

impl PlatformId {
    /// Map a `std::env::consts::OS` value to a platform
    pub fn from_os(os: &str) -> Option<Self> {
        match os {
            "windows" => Some(PlatformId::Windows),
            "macos" => Some(PlatformId::Darwin),
            "linux" => Some(PlatformId::Linux),
            _ => None,
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformId::Windows => write!(f, "Windows"),
            PlatformId::Darwin => write!(f, "Darwin"),
            PlatformId::Linux => write!(f, "Linux"),
        }
    }
}

impl FromStr for PlatformId {
    type Err = UnsupportedPlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(PlatformId::Windows),
            "darwin" | "macos" => Ok(PlatformId::Darwin),
            "linux" => Ok(PlatformId::Linux),
            _ => Err(UnsupportedPlatformError::new(format!(
                "'{}' is not one of Windows, Darwin, Linux",
                s
            ))),
        }
    }
}

/// Concrete delivery mechanisms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Linux: shell out to notify-send
    LinuxBinary,
    /// Linux: call org.freedesktop.Notifications on the session bus
    LinuxBus,
    /// macOS: bundled Notificator helper
    MacHelper,
    /// Windows: generated PowerShell toast script
    WindowsToast,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::LinuxBinary,
        StrategyKind::LinuxBus,
        StrategyKind::MacHelper,
        StrategyKind::WindowsToast,
    ];

    pub const fn platform(&self) -> PlatformId {
        match self {
            StrategyKind::LinuxBinary | StrategyKind::LinuxBus => PlatformId::Linux,
            StrategyKind::MacHelper => PlatformId::Darwin,
            StrategyKind::WindowsToast => PlatformId::Windows,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::LinuxBinary => write!(f, "linux-binary"),
            StrategyKind::LinuxBus => write!(f, "linux-bus"),
            StrategyKind::MacHelper => write!(f, "mac-helper"),
            StrategyKind::WindowsToast => write!(f, "windows-toast"),
        }
    }
}

/// Error type for parsing a strategy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notifier strategy '{value}'. Valid options: linux-binary, linux-bus, mac-helper, windows-toast")]
pub struct ParseStrategyKindError {
    pub value: String,
}

impl FromStr for StrategyKind {
    type Err = ParseStrategyKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStrategyKindError {
                value: s.to_string(),
            })
    }
}

/// What the host can do, probed once per dispatcher construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Detected host platform, if supported
    pub host: Option<PlatformId>,
    /// Major OS version (e.g. 10 for Windows 10)
    pub os_major_version: Option<u32>,
    /// Whether the session bus client was compiled in
    pub bus_library: bool,
    pub notify_send: Option<PathBuf>,
    pub aplay: Option<PathBuf>,
    pub afplay: Option<PathBuf>,
    pub powershell: Option<PathBuf>,
}

impl Capabilities {
    /// Audio player binary used on the given platform
    pub fn audio_player(&self, platform: PlatformId) -> Option<&PathBuf> {
        match platform {
            PlatformId::Linux => self.aplay.as_ref(),
            PlatformId::Darwin => self.afplay.as_ref(),
            PlatformId::Windows => self.powershell.as_ref(),
        }
    }
}
