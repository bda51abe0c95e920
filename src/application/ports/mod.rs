//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod log_sink;
pub mod notifier;

// Re-export common types
pub use config::ConfigStore;
pub use log_sink::{LogLevel, LogSink};
pub use notifier::{NotificationError, NotifierCapability};
