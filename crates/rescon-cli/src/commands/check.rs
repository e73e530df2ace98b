use crate::cli::CheckArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use rescon::engine::progress::ProgressReporter;
use rescon::workflows;

pub async fn run(args: CheckArgs, progress: &CliProgressHandler) -> Result<()> {
    let reporter = ProgressReporter::with_callback(progress.get_callback());

    let report = tokio::task::block_in_place(|| {
        workflows::validate::run(&args.raw_dir, &args.alignment, &args.sifts, &reporter)
    })?;

    println!("✓ Input data looks valid.");
    println!("  structures:        {}", report.structures_checked);
    println!("  chain table rows:  {}", report.chain_table_rows);
    println!("  alignment records: {}", report.alignment_records);
    for name in &report.missing_from_alignment {
        println!("  not in alignment:  {}", name);
    }
    Ok(())
}
