use super::{ensure_parent_dir, structure_files};
use crate::cli::MapArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use rescon::core::io::fasta::read_record_map;
use rescon::core::io::tables::{MAPPING_HEADER, write_rows_to_path};
use rescon::engine::error::EngineError;
use rescon::engine::progress::ProgressReporter;
use rescon::workflows;
use tracing::info;

pub async fn run(args: MapArgs, progress: &CliProgressHandler) -> Result<()> {
    info!("Loading reference alignment from {:?}", &args.alignment);
    let alignment = read_record_map(&args.alignment).map_err(|e| CliError::FileParsing {
        path: args.alignment.clone(),
        source: e.into(),
    })?;

    let inputs = structure_files(&args.structure_dir)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| DefaultsConfig::default().mapping_output);

    let reporter = ProgressReporter::with_callback(progress.get_callback());

    let outcome = tokio::task::block_in_place(|| {
        workflows::mapping::run(&inputs, &alignment, &args.reference, &reporter)
    })?;

    ensure_parent_dir(&output)?;
    write_rows_to_path(&outcome.rows, &MAPPING_HEADER, &output).map_err(|source| {
        EngineError::Table {
            path: output.clone(),
            source,
        }
    })?;

    if !outcome.missing_from_alignment.is_empty() {
        println!(
            "  {} structure(s) without an alignment record were skipped.",
            outcome.missing_from_alignment.len()
        );
    }
    println!(
        "✓ {} residue mapping(s) written to: {}",
        outcome.rows.len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::write_ca_trace;

    #[tokio::test(flavor = "multi_thread")]
    async fn writes_mapping_against_reference() {
        let dir = tempfile::tempdir().unwrap();
        let structures = dir.path().join("processed");
        std::fs::create_dir(&structures).unwrap();
        write_ca_trace(&structures, "1g16.pdb", &[0.0, 3.8]);
        write_ca_trace(&structures, "1gwn.pdb", &[0.0]);
        let alignment = dir.path().join("aln.fa");
        std::fs::write(&alignment, ">1g16.pdb\nGG\n>1gwn.pdb\n-G\n").unwrap();
        let output = dir.path().join("results/mapping.csv");

        run(
            MapArgs {
                structure_dir: structures,
                alignment,
                reference: "1g16".to_string(),
                output: Some(output.clone()),
            },
            &CliProgressHandler::hidden(),
        )
        .await
        .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            content,
            "pdb_id,resnum,pdb,alignment_pos,aa,ref_pdb\n\
             1g16,1,1,1,GLY,1\n\
             1g16,2,2,2,GLY,2\n\
             1gwn,1,1,2,GLY,2\n"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_alignment_is_a_parsing_error() {
        let dir = tempfile::tempdir().unwrap();
        let alignment = dir.path().join("aln.fa");
        std::fs::write(&alignment, "GG\n").unwrap();

        let result = run(
            MapArgs {
                structure_dir: dir.path().to_path_buf(),
                alignment,
                reference: "1g16".to_string(),
                output: None,
            },
            &CliProgressHandler::hidden(),
        )
        .await;
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
