use super::{file_name, read_structure_file, structure_id};
use crate::core::io::tables::MappingRow;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

const GAP: char = '-';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOutcome {
    /// Rows sorted by `(pdb_id, resnum)`.
    pub rows: Vec<MappingRow>,
    /// Files whose name has no record in the alignment.
    pub missing_from_alignment: Vec<String>,
}

/// 1-based alignment columns holding a residue, in order.
pub fn residue_columns(aligned: &str) -> Vec<usize> {
    aligned
        .chars()
        .enumerate()
        .filter(|&(_, c)| c != GAP)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Maps every residue of every structure onto the reference alignment.
///
/// Residue `k` of a structure sits at the column of the `k`-th residue
/// character of the alignment record named after the structure's file.
/// `ref_pdb` is filled with the source residue number of the `reference`
/// structure's residue in the same column, if it has one.
#[instrument(skip_all, name = "mapping_workflow", fields(reference = %reference))]
pub fn run(
    inputs: &[PathBuf],
    alignment: &HashMap<String, String>,
    reference: &str,
    reporter: &ProgressReporter,
) -> Result<MappingOutcome, EngineError> {
    let reference = reference.split('.').next().unwrap_or(reference);
    let mut outcome = MappingOutcome::default();

    reporter.report(Progress::TaskStart {
        total_steps: inputs.len() as u64,
    });

    for path in inputs {
        let name = file_name(path)?;
        let Some(aligned) = alignment.get(&name) else {
            warn!(file = %name, "Structure has no record in the alignment; skipped.");
            outcome.missing_from_alignment.push(name);
            reporter.report(Progress::TaskIncrement);
            continue;
        };

        let pdb_id = structure_id(path)?;
        let (system, _) = read_structure_file(path)?;
        let columns = residue_columns(aligned);
        let residue_count = system.residues().count();
        if residue_count > columns.len() {
            return Err(EngineError::InvalidInput(format!(
                "alignment record '{}' holds {} residues but the structure has {}",
                name,
                columns.len(),
                residue_count
            )));
        }

        outcome.rows.extend(system.residues().zip(&columns).enumerate().map(
            |(k, (residue, &column))| MappingRow {
                pdb_id: pdb_id.clone(),
                resnum: k + 1,
                pdb: residue.number,
                alignment_pos: column,
                aa: residue.name.clone(),
                ref_pdb: None,
            },
        ));
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    let reference_columns: HashMap<usize, Option<isize>> = outcome
        .rows
        .iter()
        .filter(|row| row.pdb_id == reference)
        .map(|row| (row.alignment_pos, row.pdb))
        .collect();
    if reference_columns.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "reference structure '{}' is not among the mapped structures",
            reference
        )));
    }

    for row in &mut outcome.rows {
        row.ref_pdb = reference_columns.get(&row.alignment_pos).copied().flatten();
    }
    outcome
        .rows
        .sort_by(|a, b| (&a.pdb_id, a.resnum).cmp(&(&b.pdb_id, b.resnum)));

    info!(
        rows = outcome.rows.len(),
        missing = outcome.missing_from_alignment.len(),
        "Alignment mapping finished."
    );
    Ok(outcome)
}
