use super::{ensure_parent_dir, structure_files};
use crate::cli::ContactsArgs;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use rescon::engine::error::EngineError;
use rescon::engine::progress::ProgressReporter;
use rescon::workflows;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{info, warn};

pub async fn run(
    args: ContactsArgs,
    progress: &CliProgressHandler,
    cancel: Arc<AtomicBool>,
) -> Result<()> {
    let settings = PartialAppConfig::load(args.config.as_deref())?.merge_with_cli(&args)?;
    info!(
        cutoff = settings.contact_config.cutoff,
        anchor_atom = %settings.contact_config.anchor_atom,
        pruning = ?settings.contact_config.pruning,
        "Resolved contact configuration."
    );

    let inputs = structure_files(&args.structure_dir)?;

    let reporter = ProgressReporter::with_callback(progress.get_callback());

    println!(
        "Extracting contact networks of {} structure(s) (cutoff {} Å)...",
        inputs.len(),
        settings.contact_config.cutoff
    );
    let outcome = tokio::task::block_in_place(|| {
        workflows::contacts::run(&inputs, &settings.contact_config, &reporter, &cancel)
    })?;

    if outcome.cancelled {
        return Err(CliError::Cancelled(format!(
            "contact extraction stopped after {} of {} structures; no output written",
            outcome.networks_processed,
            inputs.len()
        )));
    }
    if outcome.excluded_residues > 0 {
        warn!(
            residues = outcome.excluded_residues,
            "Some residues had no usable anchor and only appear as gaps in the networks."
        );
    }

    ensure_parent_dir(&settings.output)?;
    outcome
        .table
        .write_csv_to_path(&settings.output)
        .map_err(|source| EngineError::Table {
            path: settings.output.clone(),
            source,
        })?;

    println!(
        "✓ {} contacts from {} structure(s) written to: {}",
        outcome.table.len(),
        outcome.networks_processed,
        settings.output.display()
    );
    Ok(())
}
