//! Config command handler

use std::path::Path;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, LinuxConfig, MacosConfig, WindowsConfig};
use crate::domain::error::ConfigError;
use crate::domain::{PlatformId, StrategyKind, Urgency};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match get_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = get_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Read a config value by dotted key
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "application_name" => config.application_name.clone(),
        "icon" => config.icon.clone(),
        "audio" => config.audio.clone(),
        "urgency" => config.urgency.clone(),
        "platform" => config.platform.clone(),
        "strategy" => config.strategy.clone(),
        "enable_logging" => config.enable_logging.map(|b| b.to_string()),
        "timeout_secs" => config.timeout_secs.map(|t| t.to_string()),
        "linux.legacy" => config
            .linux
            .as_ref()
            .and_then(|l| l.legacy)
            .map(|b| b.to_string()),
        "linux.fallback" => config
            .linux
            .as_ref()
            .and_then(|l| l.fallback)
            .map(|b| b.to_string()),
        "windows.bypass_version_check" => config
            .windows
            .as_ref()
            .and_then(|w| w.bypass_version_check)
            .map(|b| b.to_string()),
        "macos.notificator" => config.notificator().map(str::to_string),
        _ => None,
    }
}

/// Validate a value and write it into the config
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    validate_config_value(key, value)?;

    match key {
        "application_name" => config.application_name = Some(value.to_string()),
        "icon" => config.icon = Some(value.to_string()),
        "audio" => config.audio = Some(value.to_string()),
        "urgency" => config.urgency = Some(value.to_lowercase()),
        "platform" => config.platform = Some(value.to_string()),
        "strategy" => config.strategy = Some(value.to_lowercase()),
        "enable_logging" => config.enable_logging = Some(parse_bool_for(key, value)?),
        "timeout_secs" => config.timeout_secs = Some(parse_timeout(key, value)?),
        "linux.legacy" => {
            config.linux.get_or_insert_with(LinuxConfig::default).legacy =
                Some(parse_bool_for(key, value)?)
        }
        "linux.fallback" => {
            config.linux.get_or_insert_with(LinuxConfig::default).fallback =
                Some(parse_bool_for(key, value)?)
        }
        "windows.bypass_version_check" => {
            config
                .windows
                .get_or_insert_with(WindowsConfig::default)
                .bypass_version_check = Some(parse_bool_for(key, value)?)
        }
        "macos.notificator" => {
            config
                .macos
                .get_or_insert_with(MacosConfig::default)
                .notificator = Some(value.to_string())
        }
        _ => return Err(invalid(key, "Unknown key".to_string())),
    }

    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "urgency" => {
            value
                .parse::<Urgency>()
                .map_err(|e| invalid(key, e.to_string()))?;
        }
        "platform" => {
            value
                .parse::<PlatformId>()
                .map_err(|e| invalid(key, e.to_string()))?;
        }
        "strategy" => {
            value
                .parse::<StrategyKind>()
                .map_err(|e| invalid(key, e.to_string()))?;
        }
        "audio" => {
            let is_wav = Path::new(value)
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("wav"))
                .unwrap_or(false);
            if !is_wav {
                return Err(invalid(key, "Audio must be a .wav file".to_string()));
            }
        }
        "timeout_secs" => {
            parse_timeout(key, value)?;
        }
        "enable_logging" | "linux.legacy" | "linux.fallback" | "windows.bypass_version_check" => {
            parse_bool_for(key, value)?;
        }
        _ => {} // free-form strings
    }
    Ok(())
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message,
    }
}

fn parse_bool_for(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'".to_string()))
}

fn parse_timeout(key: &str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(invalid(
            key,
            "Value must be a positive number of seconds".to_string(),
        )),
    }
}

/// Parse a boolean value
pub(crate) fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
