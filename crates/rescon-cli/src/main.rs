mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use clap::Parser;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("rescon CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let progress = CliProgressHandler::for_quiet(cli.quiet);
    let cancel = Arc::new(AtomicBool::new(false));
    let listener =
        handles_interrupts(&cli.command).then(|| spawn_interrupt_listener(cancel.clone()));

    let command_result = match cli.command {
        Commands::Contacts(args) => {
            info!("Dispatching to 'contacts' command.");
            commands::contacts::run(args, &progress, cancel).await
        }
        Commands::Prepare(args) => {
            info!("Dispatching to 'prepare' command.");
            commands::prepare::run(args, &progress).await
        }
        Commands::Sequences(args) => {
            info!("Dispatching to 'sequences' command.");
            commands::sequences::run(args, &progress).await
        }
        Commands::Map(args) => {
            info!("Dispatching to 'map' command.");
            commands::map::run(args, &progress).await
        }
        Commands::Check(args) => {
            info!("Dispatching to 'check' command.");
            commands::check::run(args, &progress).await
        }
    };
    if let Some(listener) = listener {
        listener.abort();
    }

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    command_result
}

/// Only the contacts batch stops cooperatively on Ctrl-C; every other
/// command keeps the default SIGINT behavior and exits immediately.
fn handles_interrupts(command: &Commands) -> bool {
    matches!(command, Commands::Contacts(_))
}

fn spawn_interrupt_listener(cancel: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after the structures in progress.");
            cancel.store(true, Ordering::Relaxed);
        }
    })
}
