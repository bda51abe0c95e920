//! No-op log sink
//!
//! Used when logging is disabled.

use crate::application::ports::{LogLevel, LogSink};

/// Log sink that discards everything
pub struct NoOpLogSink;

impl NoOpLogSink {
    /// Create a new no-op log sink
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpLogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for NoOpLogSink {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_accepts_every_level() {
        let sink = NoOpLogSink::new();
        sink.debug("debug");
        sink.info("info");
        sink.warn("warn");
        sink.error("error");
    }
}
