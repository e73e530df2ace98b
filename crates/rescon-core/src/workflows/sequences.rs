use super::{file_name, read_structure_file};
use crate::core::io::fasta::FastaRecord;
use crate::core::models::system::MolecularSystem;
use crate::core::topology::amino_acids::{is_peptide_residue, one_letter_code};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Default name of the FASTA file written by the sequence extraction.
pub const DEFAULT_SEQUENCE_FILE: &str = "PDB_sequences.fa";

/// Extracts one sequence record per single-chain structure file.
///
/// The record identifier is the file name, so that an alignment built from
/// these records can be matched back to the files by the mapping workflow.
#[instrument(skip_all, name = "sequences_workflow")]
pub fn run(inputs: &[PathBuf], reporter: &ProgressReporter) -> Result<Vec<FastaRecord>, EngineError> {
    reporter.report(Progress::TaskStart {
        total_steps: inputs.len() as u64,
    });

    let mut records = Vec::with_capacity(inputs.len());
    for path in inputs {
        let name = file_name(path)?;
        let (system, _) = read_structure_file(path)?;
        if system.chains().len() != 1 {
            return Err(EngineError::InvalidInput(format!(
                "structure '{}' has {} chains, exactly one is required",
                name,
                system.chains().len()
            )));
        }
        let sequence = peptide_sequence(&system);
        debug!(file = %name, length = sequence.len(), "Sequence extracted.");
        records.push(FastaRecord { id: name, sequence });
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    info!(records = records.len(), "Sequence extraction finished.");
    Ok(records)
}

/// One-letter sequence of the standard residues that carry a full backbone.
pub fn peptide_sequence(system: &MolecularSystem) -> String {
    system
        .residues()
        .filter(|r| is_peptide_residue(r))
        .filter_map(|r| one_letter_code(&r.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::test_support::{BACKBONE, pdb_text, write_file};

    #[test]
    fn records_are_named_after_files() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_file(
                dir.path(),
                "1g16.pdb",
                &pdb_text(&[
                    ('A', "MET", 1, &BACKBONE),
                    ('A', "LYS", 2, &BACKBONE),
                    ('A', "HOH", 3, &[("O", [9.0, 9.0, 9.0])]),
                    ('A', "VAL", 4, &[("CA", [4.0, 0.0, 0.0])]),
                    ('A', "TRP", 5, &BACKBONE),
                ]),
            ),
            write_file(dir.path(), "1gwn.pdb", &pdb_text(&[('B', "GLY", 7, &BACKBONE)])),
        ];

        let records = run(&inputs, &ProgressReporter::new()).unwrap();

        assert_eq!(
            records,
            vec![
                FastaRecord::new("1g16.pdb", "MKW"),
                FastaRecord::new("1gwn.pdb", "G"),
            ]
        );
    }

    #[test]
    fn multi_chain_structures_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![write_file(
            dir.path(),
            "2abc.pdb",
            &pdb_text(&[('A', "GLY", 1, &BACKBONE), ('B', "GLY", 1, &BACKBONE)]),
        )];
        let err = run(&inputs, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("2abc.pdb")));
    }
}
