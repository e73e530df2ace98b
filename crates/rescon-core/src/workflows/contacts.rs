use super::{read_structure, structure_id};
use crate::core::io::tables::NetworkTable;
use crate::engine::config::ContactConfig;
use crate::engine::error::EngineError;
use crate::engine::network::ContactNetwork;
use crate::engine::progress::{Progress, ProgressReporter, StructureProgress, StructureStatus};
use crate::workflows::extract;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// Rows of every completed structure, sorted by `(pdb_id, res_A, res_B)`.
    pub table: NetworkTable,
    pub networks_processed: usize,
    pub excluded_residues: usize,
    /// Set when the batch stopped early; `table` then holds only the
    /// structures that finished.
    pub cancelled: bool,
}

/// Extracts the contact network of every structure file in `inputs`.
///
/// Each file becomes one structure named after the file (up to the first
/// `.`), with the residues of all its chains in file order. `cancel` is
/// checked before each structure starts. The first file that cannot be read
/// aborts the batch.
#[instrument(skip_all, name = "contacts_workflow")]
pub fn run(
    inputs: &[PathBuf],
    config: &ContactConfig,
    reporter: &ProgressReporter,
    cancel: &AtomicBool,
) -> Result<BatchOutcome, EngineError> {
    let total = inputs.len();
    info!(
        structures = total,
        cutoff = config.cutoff,
        anchor_atom = %config.anchor_atom,
        "Starting contact extraction."
    );

    let completed = AtomicUsize::new(0);
    let silent = ProgressReporter::new();

    let process = |path: &PathBuf| -> Result<Option<ContactNetwork>, EngineError> {
        if cancel.load(Ordering::Relaxed) {
            return Ok(None);
        }
        let id = structure_id(path)?;
        let structure = read_structure(path, &id)?;
        let network = extract::run(&structure, config, &silent);

        reporter.report(Progress::Structure(StructureProgress {
            position: completed.fetch_add(1, Ordering::Relaxed) + 1,
            total,
            id,
            status: StructureStatus::Extracted {
                contacts: network.contacts.len(),
                excluded: network.excluded.len(),
            },
        }));
        reporter.report(Progress::TaskIncrement);
        Ok(Some(network))
    };

    let results: Vec<Option<ContactNetwork>> = reporter.phase("Contact extraction", total, || {
        #[cfg(not(feature = "parallel"))]
        let iterator = inputs.iter();

        #[cfg(feature = "parallel")]
        let iterator = inputs.par_iter();

        iterator
            .map(process)
            .collect::<Result<Vec<_>, EngineError>>()
    })?;

    let cancelled = results.iter().any(Option::is_none);
    let networks: Vec<ContactNetwork> = results.into_iter().flatten().collect();

    let mut table = networks
        .iter()
        .map(|network| NetworkTable::from_rows(network.rows()))
        .fold(NetworkTable::new(), NetworkTable::merge);
    table.sort();

    let outcome = BatchOutcome {
        networks_processed: networks.len(),
        excluded_residues: networks.iter().map(|n| n.excluded.len()).sum(),
        table,
        cancelled,
    };

    if outcome.cancelled {
        warn!(
            completed = outcome.networks_processed,
            total, "Contact extraction cancelled."
        );
    } else {
        info!(
            structures = outcome.networks_processed,
            contacts = outcome.table.len(),
            excluded_residues = outcome.excluded_residues,
            "Contact extraction finished."
        );
    }

    Ok(outcome)
}
