//! Notification infrastructure module
//!
//! One strategy per platform mechanism:
//! - Linux: session bus (primary) or notify-send
//! - macOS: bundled Notificator helper
//! - Windows: generated PowerShell toast script

mod audio;
#[cfg(feature = "dbus")]
mod dbus;
mod escape;
mod factory;
mod notificator;
mod notify_send;
#[cfg(all(test, unix))]
mod test_support;
mod toast;

pub use audio::AudioPlayer;
#[cfg(feature = "dbus")]
pub use dbus::DbusNotifier;
pub use factory::{
    create_dispatcher, create_dispatcher_with, default_strategy, select_strategy,
    MIN_WINDOWS_VERSION,
};
pub use notificator::{helper_in_bundle, NotificatorNotifier};
pub use notify_send::NotifySendNotifier;
pub use toast::{toast_script, toast_xml, ToastNotifier};
