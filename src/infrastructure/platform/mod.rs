//! Host capability probing
//!
//! Everything strategy selection needs to know about the host is gathered
//! here, once, into a [`Capabilities`] record.

use std::path::PathBuf;

use crate::domain::{Capabilities, PlatformId};

/// Look a binary up on `PATH`
pub fn locate_binary(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Probe the running host
pub fn probe_capabilities() -> Capabilities {
    Capabilities {
        host: PlatformId::from_os(std::env::consts::OS),
        os_major_version: sysinfo::System::os_version()
            .as_deref()
            .and_then(parse_major_version),
        bus_library: cfg!(feature = "dbus"),
        notify_send: locate_binary("notify-send"),
        aplay: locate_binary("aplay"),
        afplay: locate_binary("afplay"),
        powershell: locate_binary("powershell"),
    }
}

/// Leading integer of a version string such as `"10 (19045)"` or `"14.2.1"`
pub fn parse_major_version(version: &str) -> Option<u32> {
    version
        .trim()
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse().ok())
}
