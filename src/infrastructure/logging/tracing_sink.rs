//! Log sink backed by `tracing`

use tracing_subscriber::EnvFilter;

use crate::application::ports::{LogLevel, LogSink};

/// Forwards records to the `tracing` macros under the `notify_dispatch` target
pub struct TracingLogSink;

impl TracingLogSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingLogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for TracingLogSink {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "notify_dispatch", "{}", message),
            LogLevel::Info => tracing::info!(target: "notify_dispatch", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "notify_dispatch", "{}", message),
            LogLevel::Error => tracing::error!(target: "notify_dispatch", "{}", message),
        }
    }
}

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `notify_dispatch=debug`.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("notify_dispatch=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
