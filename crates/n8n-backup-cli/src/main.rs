mod cli;
mod cmd;
mod config_gen;
mod dispatch;
mod format;
mod table;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use n8n_backup_core::app;

use cli::{Cli, Commands};
use config_gen::run_config_generate;
use dispatch::{dispatch_command, run_default_actions};

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG, when set, takes precedence over -v.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Handle `config` subcommand early, no config file needed
    if let Some(Commands::Config { dest }) = &cli.command {
        if let Err(e) = run_config_generate(dest.as_deref()) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let runtime = match app::load_runtime_config(cli.config.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match &runtime.source {
        Some(source) => tracing::info!("Using config: {source}"),
        None => tracing::info!("No config file found, using built-in defaults"),
    }

    let result = match &cli.command {
        Some(cmd) => {
            tracing::debug!(command = cmd.name(), "dispatching");
            dispatch_command(cmd, &runtime.config)
        }
        None => run_default_actions(&runtime.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
