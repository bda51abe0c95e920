//! Application layer - Dispatch and delivery
//!
//! Contains the dispatcher, the task-based delivery runner and the
//! trait definitions for external system interactions.

pub mod delivery;
pub mod dispatcher;
pub mod ports;

pub use delivery::{DeliveryHandle, DeliveryRunner, DEFAULT_SEND_TIMEOUT};
pub use dispatcher::{detect_platform, DispatchOptions, Dispatcher, NotifyError};
