//! Domain layer - Core value objects
//!
//! Contains the notification request, validated resource paths,
//! platform identity and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod platform;
pub mod request;
pub mod resource;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use platform::{Capabilities, PlatformId, StrategyKind};
pub use request::{NotificationRequest, Urgency};
pub use resource::{PathResolver, ResolvedPath, ResourceKind};
