use super::{ensure_parent_dir, structure_files};
use crate::cli::SequencesArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use rescon::core::io::fasta::write_records_to_path;
use rescon::engine::error::EngineError;
use rescon::engine::progress::ProgressReporter;
use rescon::workflows;

pub async fn run(args: SequencesArgs, progress: &CliProgressHandler) -> Result<()> {
    let inputs = structure_files(&args.structure_dir)?;
    let output = args
        .output
        .unwrap_or_else(|| DefaultsConfig::default().sequence_output);

    let reporter = ProgressReporter::with_callback(progress.get_callback());

    let records = tokio::task::block_in_place(|| workflows::sequences::run(&inputs, &reporter))?;

    ensure_parent_dir(&output)?;
    write_records_to_path(&records, &output).map_err(|source| EngineError::Fasta {
        path: output.clone(),
        source,
    })?;

    println!(
        "✓ {} sequence(s) written to: {}",
        records.len(),
        output.display()
    );
    Ok(())
}
