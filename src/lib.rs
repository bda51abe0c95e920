//! notify-dispatch - native desktop notifications from one API
//!
//! Builds a notification request once and delivers it through whichever
//! mechanism the host offers: the freedesktop session bus or `notify-send`
//! on Linux, a Notificator helper app on macOS, and a PowerShell-driven
//! toast on Windows.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Request, resource paths, platform identity, config and errors
//! - **Application**: Port interfaces (traits), the dispatcher and the delivery runner
//! - **Infrastructure**: Platform strategies, capability probing, config store, log sinks
//! - **CLI**: Command-line interface and argument parsing
//! - **Notify**: The caller-facing facade tying it all together

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod notify;

pub use application::ports::{LogSink, NotificationError, NotifierCapability};
pub use application::{DeliveryHandle, NotifyError};
pub use domain::{NotificationRequest, PlatformId, StrategyKind, Urgency};
pub use notify::{Notify, NotifyBuilder};
