//! Rendering batch reports for people and for tools.
//!
//! This example shows how to:
//! - Run a batch in parallel on blocking worker tasks
//! - Render the report with the human and JSON formatters
//! - Use the formatter presets
//!
//! Run with:
//! ```bash
//! cargo run -p pole-demos --example report_formatters
//! ```

use pole_guard::formatters::feet_and_inches;
use pole_guard::prelude::*;

fn survey(rows: usize) -> String {
    let mut data = String::from("HANDLE,TYPE,LWSTPWR,STLT,CATV,TELCO\n");
    for i in 0..rows {
        let power = match i % 4 {
            0 => "PWR 21 0",
            1 => "PWR 18 0",
            _ => "PWR 32 0",
        };
        data.push_str(&format!("'{:04}',JNT,{power},BTM 24 0,CATV 18 6,TELCO 17 0\n", 3000 + i));
    }
    data
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let table = PoleTable::from_reader(survey(12).as_bytes(), &CsvOptions::default())?;
    let runner = BatchRunner::new(AnalyzerConfig::default().with_max_concurrency(4))
        .with_name("formatter_demo");
    let report = runner.run_parallel(&table).await?;

    if let Some(first) = report.results.first() {
        println!("PHOA of the first pole: {}", feet_and_inches(first.proposed_height));
    }

    println!("\n=== Human (default) ===");
    println!("{}", HumanFormatter::new().format(&report)?);

    println!("\n=== Human (minimal) ===");
    println!("{}", HumanFormatter::with_config(FormatterConfig::minimal()).format(&report)?);

    println!("\n=== Human (ci, capped at 2 poles) ===");
    let ci = FormatterConfig::ci().with_max_poles(Some(2));
    println!("{}", HumanFormatter::with_config(ci).format(&report)?);

    println!("\n=== JSON (compact, make-ready poles only) ===");
    let json = JsonFormatter::with_config(FormatterConfig::default().with_clear_poles(false))
        .with_pretty(false)
        .format(&report)?;
    println!("{json}");

    Ok(())
}
