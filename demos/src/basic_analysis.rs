//! Basic make-ready analysis of a small pole survey.
//!
//! This example shows how to:
//! - Load a survey table from a CSV file
//! - Analyze every pole with the default clearances
//! - Inspect the reasons and write the analyzed table back
//!
//! Run with:
//! ```bash
//! cargo run -p pole-demos --example basic_analysis
//! ```

use pole_guard::logging::setup::{init_logging, LoggingConfig};
use pole_guard::prelude::*;
use pole_guard::sources::{write_analyzed_csv, CsvSource, PoleSource};

const SURVEY: &str = "\
HANDLE,TYPE,OWNER,LWSTPWR,BLNK,TRFCCRCT,STLT,CATV,TELCO,PLHT,COMNTS
'1001',JNT,CITY,PWR 31 6,,,,CATV 18 6,TELCO 17 0,,
'1002',JNT,CITY,PWR 21 0,TRANS BTM 24 0,TRFC 20 2,BTM 19 8,CATV 18 6,,,busy pole
'1003',TELCOPL,TELCO,,,,,CATV 18 6,,19 0,short pole
'1004',JNT,CITY,PRI 34 0/NEUT 26 0,STLT DL 21 0,,,,,,no comm
";

fn main() -> Result<()> {
    if let Err(e) = init_logging(LoggingConfig::default()) {
        eprintln!("Logging already initialized: {e}");
    }

    let dir = tempfile::tempdir()?;
    let input = dir.path().join("survey.csv");
    let output = dir.path().join("survey_analyzed.csv");
    std::fs::write(&input, SURVEY)?;

    let source = CsvSource::new(&input);
    let table = source.load()?;
    println!("Loaded {} poles from {}\n", table.pole_count(), source.description());

    let report = BatchRunner::new(AnalyzerConfig::default()).run(&table);

    for result in &report.results {
        let verdict = if result.needs_make_ready { "MAKE READY" } else { "clear" };
        println!(
            "{:<6} {:<10} PHOA {:>3}\" {}",
            result.pole_handle,
            result.pole_kind.as_str(),
            result.proposed_height,
            verdict
        );
        for reason in &result.reasons {
            println!("         - {reason}");
        }
    }

    println!(
        "\n{} of {} poles need make-ready ({:.1}%)",
        report.metrics.make_ready_poles,
        report.metrics.total_poles,
        report.metrics.make_ready_rate()
    );

    write_analyzed_csv(&output, &table, &report.results, source.options())?;
    println!("\nAnalyzed table:\n{}", std::fs::read_to_string(&output)?);

    Ok(())
}
