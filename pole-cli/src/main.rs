use anyhow::{anyhow, Context, Result};
use clap::Parser;
use pole_cli::Args;
use pole_guard::core::BatchRunner;
use pole_guard::logging::setup::init_logging;
use pole_guard::sources::{write_analyzed_csv, PoleTable};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.logging_config()).map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    let config = args.resolve_config()?;
    let options = args.csv_options()?;

    let table = PoleTable::from_path(&args.input, &options)
        .with_context(|| format!("Failed to read pole table {}", args.input.display()))?;
    info!(
        input = %args.input.display(),
        poles = table.pole_count(),
        rejected = table.rejected_count(),
        "Loaded pole table"
    );

    let runner = BatchRunner::new(config);
    let report = if args.parallel {
        runner
            .run_parallel(&table)
            .await
            .context("Parallel analysis failed")?
    } else {
        runner.run(&table)
    };

    write_analyzed_csv(&args.output, &table, &report.results, &options)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let rendered = args
        .formatter()
        .format(&report)
        .context("Failed to render report")?;
    println!("{rendered}");
    println!("Analyzed table written to {}", args.output.display());

    Ok(())
}
