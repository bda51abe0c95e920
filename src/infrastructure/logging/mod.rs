//! Log sink adapters
//!
//! `NoOpLogSink` is the default. `TracingLogSink` forwards to `tracing`;
//! the binary decides whether a subscriber is installed.

mod noop;
mod tracing_sink;

pub use noop::NoOpLogSink;
pub use tracing_sink::{init_tracing, TracingLogSink};
