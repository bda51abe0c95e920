//! Infrastructure layer - Adapter implementations
//!
//! Contains the platform notification strategies, host capability
//! probing, configuration storage and log sinks.

pub mod config;
pub mod logging;
pub mod notification;
pub mod platform;

// Re-export adapters
pub use config::XdgConfigStore;
pub use logging::{init_tracing, NoOpLogSink, TracingLogSink};
pub use notification::{create_dispatcher, NotificatorNotifier, NotifySendNotifier, ToastNotifier};
pub use platform::probe_capabilities;
