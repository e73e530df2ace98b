use super::{file_name, list_structure_files, read_structure_file};
use crate::core::io::fasta::read_record_map;
use crate::core::io::tables::ChainPfamTable;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub structures_checked: usize,
    pub chain_table_rows: usize,
    pub alignment_records: usize,
    /// Structure files without a record of the same name in the alignment.
    pub missing_from_alignment: Vec<String>,
}

/// Checks the inputs of an analysis before anything is computed.
///
/// Every file in `structure_dir` must end in `.pdb` and parse with at least
/// one chain, and the chain table and alignment must parse. Structures that
/// the alignment does not cover are reported, not rejected.
#[instrument(skip_all, name = "validate_workflow")]
pub fn run(
    structure_dir: &Path,
    alignment_path: &Path,
    chain_table_path: &Path,
    reporter: &ProgressReporter,
) -> Result<ValidationReport, EngineError> {
    let files = list_structure_files(structure_dir)?;

    reporter.report(Progress::PhaseStart {
        name: "Structure files",
    });
    reporter.report(Progress::TaskStart {
        total_steps: files.len() as u64,
    });
    let mut names = Vec::with_capacity(files.len());
    for path in &files {
        let name = file_name(path)?;
        if !name.ends_with(".pdb") {
            return Err(EngineError::InvalidInput(format!(
                "unexpected file name '{}': structure files must end with '.pdb'",
                name
            )));
        }
        let (system, _) = read_structure_file(path)?;
        if system.chains().is_empty() {
            return Err(EngineError::InvalidInput(format!(
                "'{}' contains no chains",
                name
            )));
        }
        names.push(name);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let chain_table =
        ChainPfamTable::read_csv_from_path(chain_table_path).map_err(|source| {
            EngineError::Table {
                path: chain_table_path.to_path_buf(),
                source,
            }
        })?;

    let alignment = read_record_map(alignment_path).map_err(|source| EngineError::Fasta {
        path: alignment_path.to_path_buf(),
        source,
    })?;

    let missing_from_alignment: Vec<String> = names
        .into_iter()
        .filter(|name| !alignment.contains_key(name))
        .collect();
    if !missing_from_alignment.is_empty() {
        warn!(
            count = missing_from_alignment.len(),
            structures = ?missing_from_alignment,
            "Structures missing from the alignment will be excluded from mapping."
        );
    }

    let report = ValidationReport {
        structures_checked: files.len(),
        chain_table_rows: chain_table.rows().len(),
        alignment_records: alignment.len(),
        missing_from_alignment,
    };
    info!(
        structures = report.structures_checked,
        chain_table_rows = report.chain_table_rows,
        alignment_records = report.alignment_records,
        "Input validation passed."
    );
    Ok(report)
}
