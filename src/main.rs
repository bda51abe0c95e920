//! notify-dispatch CLI entry point

use std::process::ExitCode;

use clap::Parser;

use notify_dispatch::cli::{
    app::{load_merged_config, run_notify, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    SendOptions,
};
use notify_dispatch::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command.take() {
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Merge config
    let config = load_merged_config(&store, cli.to_config()).await;

    let options = SendOptions {
        title: cli.title,
        message: cli.message,
        no_wait: cli.no_wait,
        config,
    };

    run_notify(options).await
}
