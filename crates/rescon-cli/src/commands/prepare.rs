use super::{ensure_parent_dir, structure_files};
use crate::cli::PrepareArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use rescon::core::io::tables::{CHAIN_SELECTION_HEADER, ChainPfamTable, write_rows_to_path};
use rescon::engine::config::PrepareConfigBuilder;
use rescon::engine::error::EngineError;
use rescon::engine::progress::ProgressReporter;
use rescon::workflows;
use tracing::info;

pub async fn run(args: PrepareArgs, progress: &CliProgressHandler) -> Result<()> {
    let config = PrepareConfigBuilder::new()
        .pfam_domain(&args.pfam_domain)
        .overwrite(args.overwrite)
        .build()
        .map_err(EngineError::from)?;

    info!("Loading chain assignments from {:?}", &args.sifts);
    let chain_table =
        ChainPfamTable::read_csv_from_path(&args.sifts).map_err(|e| CliError::FileParsing {
            path: args.sifts.clone(),
            source: e.into(),
        })?;

    let raw_files = structure_files(&args.raw_dir)?;
    let report_path = args
        .selection_report
        .clone()
        .unwrap_or_else(|| DefaultsConfig::default().selection_report);

    let reporter = ProgressReporter::with_callback(progress.get_callback());

    println!(
        "Selecting {} chains from {} raw structure(s)...",
        config.pfam_domain,
        raw_files.len()
    );
    let outcome = tokio::task::block_in_place(|| {
        workflows::prepare::run(
            &raw_files,
            &chain_table,
            &args.output_dir,
            &config,
            &reporter,
        )
    })?;

    ensure_parent_dir(&report_path)?;
    write_rows_to_path(&outcome.selections, &CHAIN_SELECTION_HEADER, &report_path).map_err(
        |source| EngineError::Table {
            path: report_path.clone(),
            source,
        },
    )?;

    println!(
        "✓ {} chain(s) written to {} ({} skipped); selection report: {}",
        outcome.written.len(),
        args.output_dir.display(),
        outcome.skipped.len(),
        report_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::commands::test_support::write_ca_trace;
    use clap::Parser;

    fn args(extra: &[&str]) -> PrepareArgs {
        let mut argv = vec!["rescon", "prepare"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Prepare(args) => args,
            _ => panic!("Expected 'prepare' subcommand"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn writes_chains_and_selection_report() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        std::fs::create_dir(&raw).unwrap();
        write_ca_trace(&raw, "1g16.pdb", &[0.0, 3.8]);
        write_ca_trace(&raw, "9xyz.pdb", &[0.0, 3.8]);
        let sifts = dir.path().join("pdb_chain_pfam.csv");
        std::fs::write(&sifts, "PDB,CHAIN,PFAM_ID\n1g16,A,PF00071\n").unwrap();
        let processed = dir.path().join("processed");
        let report = dir.path().join("results/selected.csv");

        run(
            args(&[
                raw.to_str().unwrap(),
                "PF00071",
                sifts.to_str().unwrap(),
                processed.to_str().unwrap(),
                "--selection-report",
                report.to_str().unwrap(),
            ]),
            &CliProgressHandler::hidden(),
        )
        .await
        .unwrap();

        assert!(processed.join("1g16.pdb").is_file());
        assert!(!processed.join("9xyz.pdb").exists());
        let content = std::fs::read_to_string(&report).unwrap();
        assert_eq!(content, "pdb_id,chain\n1g16,A\n");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreadable_chain_table_is_a_parsing_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let result = run(
            args(&[
                dir.path().to_str().unwrap(),
                "PF00071",
                missing.to_str().unwrap(),
                dir.path().join("out").to_str().unwrap(),
            ]),
            &CliProgressHandler::hidden(),
        )
        .await;
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
