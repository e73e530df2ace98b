use super::{file_name, read_structure_file, structure_id};
use crate::core::io::pdb::{PdbFile, PdbMetadata};
use crate::core::io::tables::{ChainPfamTable, ChainSelectionRow};
use crate::engine::config::PrepareConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter, StructureProgress, StructureStatus};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The chain table lists no chain of this structure with the domain.
    NoChainWithDomain,
    /// The selected chain is not present in the file.
    ChainNotInFile(char),
    /// Cleaning removed every atom of the selected chain.
    NoAtomsAfterCleaning(char),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoChainWithDomain => write!(f, "no chain with the domain of interest"),
            SkipReason::ChainNotInFile(c) => write!(f, "chain {} not found in file", c),
            SkipReason::NoAtomsAfterCleaning(c) => {
                write!(f, "chain {} has no atoms left after cleaning", c)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStructure {
    pub pdb_id: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareOutcome {
    pub selections: Vec<ChainSelectionRow>,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedStructure>,
}

/// Writes, for every raw structure, the first chain the chain table assigns
/// to the configured Pfam domain into `output_dir`, cleaned of heteroatoms
/// and hydrogens.
///
/// `output_dir` is created if missing. An existing non-empty directory is an
/// error unless `config.overwrite` is set, in which case its files are
/// removed first.
#[instrument(skip_all, name = "prepare_workflow", fields(domain = %config.pfam_domain))]
pub fn run(
    raw_files: &[PathBuf],
    chain_table: &ChainPfamTable,
    output_dir: &Path,
    config: &PrepareConfig,
    reporter: &ProgressReporter,
) -> Result<PrepareOutcome, EngineError> {
    prepare_output_dir(output_dir, config.overwrite)?;

    let total = raw_files.len();
    let outcome = reporter.phase("Chain preparation", total, || {
        let mut outcome = PrepareOutcome::default();
        for (idx, path) in raw_files.iter().enumerate() {
            let pdb_id = structure_id(path)?;
            let status = match prepare_one(path, &pdb_id, chain_table, output_dir, config)? {
                Ok((chain, written)) => {
                    outcome.selections.push(ChainSelectionRow {
                        pdb_id: pdb_id.clone(),
                        chain,
                    });
                    outcome.written.push(written);
                    StructureStatus::ChainSelected(chain)
                }
                Err(reason) => {
                    warn!(pdb_id = %pdb_id, %reason, "Structure skipped.");
                    outcome.skipped.push(SkippedStructure {
                        pdb_id: pdb_id.clone(),
                        reason,
                    });
                    StructureStatus::Skipped(reason.to_string())
                }
            };
            reporter.report(Progress::Structure(StructureProgress {
                position: idx + 1,
                total,
                id: pdb_id,
                status,
            }));
            reporter.report(Progress::TaskIncrement);
        }
        Ok::<_, EngineError>(outcome)
    })?;

    info!(
        raw = raw_files.len(),
        prepared = outcome.selections.len(),
        skipped = outcome.skipped.len(),
        output_dir = %output_dir.display(),
        "Chain preparation finished."
    );
    Ok(outcome)
}

fn prepare_one(
    path: &Path,
    pdb_id: &str,
    chain_table: &ChainPfamTable,
    output_dir: &Path,
    config: &PrepareConfig,
) -> Result<Result<(char, PathBuf), SkipReason>, EngineError> {
    let Some(&chain_id) = chain_table
        .chains_with_domain(pdb_id, &config.pfam_domain)
        .first()
    else {
        return Ok(Err(SkipReason::NoChainWithDomain));
    };

    let (system, _) = read_structure_file(path)?;
    let Some(mut chain) = system.extract_chain(chain_id) else {
        return Ok(Err(SkipReason::ChainNotInFile(chain_id)));
    };

    chain.retain_atoms(|atom| {
        !(config.remove_heteroatoms && atom.is_hetero())
            && !(config.remove_hydrogens && atom.is_hydrogen())
    });
    if chain.atom_count() == 0 {
        return Ok(Err(SkipReason::NoAtomsAfterCleaning(chain_id)));
    }

    let out_path = output_dir.join(file_name(path)?);
    PdbFile::write_to_path(&chain, &PdbMetadata::default(), &out_path).map_err(|source| {
        EngineError::Structure {
            path: out_path.clone(),
            source,
        }
    })?;
    Ok(Ok((chain_id, out_path)))
}

fn prepare_output_dir(dir: &Path, overwrite: bool) -> Result<(), EngineError> {
    let io_err = |source| EngineError::Io {
        path: dir.to_path_buf(),
        source,
    };
    if !dir.exists() {
        return fs::create_dir_all(dir).map_err(io_err);
    }

    let entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(io_err)?;
    if entries.is_empty() {
        return Ok(());
    }
    if !overwrite {
        return Err(EngineError::InvalidInput(format!(
            "output directory '{}' is not empty (use overwrite to clear it)",
            dir.display()
        )));
    }

    warn!(dir = %dir.display(), files = entries.len(), "Clearing output directory.");
    for entry in entries.iter().filter(|p| p.is_file()) {
        fs::remove_file(entry).map_err(|source| EngineError::Io {
            path: entry.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::PrepareConfigBuilder;
    use crate::workflows::test_support::write_file;

    const RAW: &str = "\
HEADER    SIGNALING PROTEIN                       01-JAN-00   1G16
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       1.458   0.000   0.000  1.00  0.00           C
ATOM      3  N   GLY B   1      10.000   0.000   0.000  1.00  0.00           N
ATOM      4  CA  GLY B   1      11.458   0.000   0.000  1.00  0.00           C
ATOM      5  HA2 GLY B   1      11.900   0.900   0.000  1.00  0.00           H
HETATM    6 MG    MG B 201      15.000   0.000   0.000  1.00  0.00          MG
END
";

    const SIFTS: &str = "\
# comment line
PDB,CHAIN,SP_PRIMARY,PFAM_ID
1g16,B,P01123,PF00071
1g16,A,P01123,PF00071
";

    fn config(overwrite: bool) -> PrepareConfig {
        PrepareConfigBuilder::new()
            .pfam_domain("PF00071")
            .overwrite(overwrite)
            .build()
            .unwrap()
    }

    #[test]
    fn writes_first_listed_chain_without_hydrogens_or_heteroatoms() {
        let raw = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_file(raw.path(), "1g16.pdb", RAW),
            write_file(raw.path(), "4mit.pdb", RAW),
        ];
        let table = ChainPfamTable::read_csv(SIFTS.as_bytes()).unwrap();

        let outcome = run(&inputs, &table, out.path(), &config(false), &ProgressReporter::new())
            .unwrap();

        assert_eq!(
            outcome.selections,
            vec![ChainSelectionRow {
                pdb_id: "1g16".into(),
                chain: 'B'
            }]
        );
        assert_eq!(
            outcome.skipped,
            vec![SkippedStructure {
                pdb_id: "4mit".into(),
                reason: SkipReason::NoChainWithDomain
            }]
        );

        let (system, metadata) = PdbFile::read_from_path(out.path().join("1g16.pdb")).unwrap();
        assert!(metadata.header_lines.is_empty());
        assert_eq!(system.chains().len(), 1);
        assert_eq!(system.chains()[0].id, 'B');
        let names: Vec<_> = system.atoms().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["N", "CA"]);
    }

    #[test]
    fn reports_selected_and_skipped_structures() {
        use std::sync::Mutex;
        let raw = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_file(raw.path(), "1g16.pdb", RAW),
            write_file(raw.path(), "4mit.pdb", RAW),
        ];
        let table = ChainPfamTable::read_csv(SIFTS.as_bytes()).unwrap();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Structure(done) = event {
                events.lock().unwrap().push(done);
            }
        }));

        run(&inputs, &table, out.path(), &config(false), &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].to_string(), "(1/2) 1g16");
        assert_eq!(events[0].status, StructureStatus::ChainSelected('B'));
        assert!(events[1].is_skipped());
        assert_eq!(
            events[1].status,
            StructureStatus::Skipped(SkipReason::NoChainWithDomain.to_string())
        );
    }

    #[test]
    fn chain_missing_from_file_is_skipped() {
        let raw = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let inputs = vec![write_file(raw.path(), "1g16.pdb", RAW)];
        let table =
            ChainPfamTable::read_csv("PDB,CHAIN,PFAM_ID\n1g16,Z,PF00071\n".as_bytes()).unwrap();

        let outcome = run(&inputs, &table, out.path(), &config(false), &ProgressReporter::new())
            .unwrap();
        assert_eq!(outcome.skipped[0].reason, SkipReason::ChainNotInFile('Z'));
        assert!(outcome.written.is_empty());
    }

    #[test]
    fn non_empty_output_dir_requires_overwrite() {
        let raw = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_file(out.path(), "stale.pdb", "old");
        let inputs = vec![write_file(raw.path(), "1g16.pdb", RAW)];
        let table = ChainPfamTable::read_csv(SIFTS.as_bytes()).unwrap();

        let err = run(&inputs, &table, out.path(), &config(false), &ProgressReporter::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(out.path().join("stale.pdb").exists());

        run(&inputs, &table, out.path(), &config(true), &ProgressReporter::new()).unwrap();
        assert!(!out.path().join("stale.pdb").exists());
        assert!(out.path().join("1g16.pdb").exists());
    }

    #[test]
    fn missing_output_dir_is_created() {
        let raw = tempfile::tempdir().unwrap();
        let base = tempfile::tempdir().unwrap();
        let out = base.path().join("processed");
        let inputs = vec![write_file(raw.path(), "1g16.pdb", RAW)];
        let table = ChainPfamTable::read_csv(SIFTS.as_bytes()).unwrap();

        run(&inputs, &table, &out, &config(false), &ProgressReporter::new()).unwrap();
        assert!(out.join("1g16.pdb").exists());
    }
}
