//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, LinuxConfig, MacosConfig, WindowsConfig, DEFAULT_TIMEOUT_SECS,
};
