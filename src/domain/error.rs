//! Domain error types

use std::path::PathBuf;

use thiserror::Error;

/// Error when an icon or audio reference fails validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("Invalid icon path: \"{}\" does not exist", path.display())]
    InvalidIconPath { path: PathBuf },

    #[error("Invalid audio path: \"{}\" does not exist", path.display())]
    InvalidAudioPath { path: PathBuf },

    #[error("Invalid audio format: \"{}\". Only .wav files are supported", path.display())]
    InvalidAudioFormat { path: PathBuf },
}

/// Error when no notifier exists for the requested or detected platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported platform: {reason}")]
pub struct UnsupportedPlatformError {
    pub reason: String,
}

impl UnsupportedPlatformError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
