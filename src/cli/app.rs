//! Main app runner for sending one notification

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ConfigStore, LogSink};
use crate::application::NotifyError;
use crate::domain::config::AppConfig;
use crate::infrastructure::{init_tracing, NoOpLogSink, TracingLogSink};
use crate::notify::NotifyBuilder;

use super::args::{SendOptions, ENABLE_LOGGING_ENV};
use super::config_cmd::parse_bool;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// How long `--no-wait` lingers for a quick outcome before exiting
pub const NO_WAIT_GRACE: Duration = Duration::from_millis(250);

/// Send one notification and report the outcome
pub async fn run_notify(options: SendOptions) -> ExitCode {
    let mut presenter = Presenter::new();
    let config = &options.config;

    let log: Arc<dyn LogSink> = if config.enable_logging_or_default() {
        init_tracing();
        Arc::new(TracingLogSink::new())
    } else {
        Arc::new(NoOpLogSink::new())
    };

    let mut builder = match NotifyBuilder::from_config(config) {
        Ok(builder) => builder.log_sink(log),
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(exit_code_for(&e));
        }
    };
    if let Some(title) = options.title {
        builder = builder.title(title);
    }
    if let Some(message) = options.message {
        builder = builder.message(message);
    }

    let notify = match builder.build() {
        Ok(notify) => notify,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(exit_code_for(&e));
        }
    };

    if options.no_wait {
        let handle = notify.send_async();
        return match handle.wait_timeout(NO_WAIT_GRACE).await {
            Ok(true) => ExitCode::from(EXIT_SUCCESS),
            // a pending delivery also reports false here; it is not a failure
            Ok(false) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(exit_code_for(&e))
            }
        };
    }

    presenter.start_spinner(&format!(
        "Sending notification via {}...",
        notify.strategy_name()
    ));

    match notify.send().await {
        Ok(true) => {
            presenter.spinner_success("Notification delivered");
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(false) => {
            presenter.spinner_fail("Notification was not delivered");
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Map an error to the process exit code
pub fn exit_code_for(err: &NotifyError) -> u8 {
    match err {
        NotifyError::Resource(_)
        | NotifyError::UnsupportedPlatform(_)
        | NotifyError::InvalidArgument(_)
        | NotifyError::Config(_) => EXIT_USAGE_ERROR,
        NotifyError::BinaryNotFound(_) | NotifyError::NotificationFailure(_) => EXIT_ERROR,
    }
}

/// Config layer taken from the environment
pub fn env_config() -> AppConfig {
    env_config_from(env::var(ENABLE_LOGGING_ENV).ok())
}

fn env_config_from(enable_logging: Option<String>) -> AppConfig {
    AppConfig {
        enable_logging: enable_logging
            .filter(|s| !s.is_empty())
            .and_then(|s| parse_bool(&s).ok()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}
