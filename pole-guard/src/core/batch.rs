//! Whole-table analysis.

use super::analyzer::PoleAnalyzer;
use super::record::RawRecord;
use super::result::{AnalysisResult, BatchReport};
use crate::config::AnalyzerConfig;
use crate::error::{PoleError, Result};
use crate::log_table_op;
use crate::logging::LogConfig;
use crate::sources::{PoleTable, TableRow};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, instrument};

/// Smallest number of poles handed to one blocking task.
const MIN_CHUNK_SIZE: usize = 64;

/// Runs a [`PoleAnalyzer`] over every pole of a table.
///
/// # Examples
///
/// ```rust
/// use pole_guard::config::AnalyzerConfig;
/// use pole_guard::core::BatchRunner;
/// use pole_guard::sources::{CsvOptions, PoleTable};
///
/// let data = "HANDLE,CATV,LWSTPWR\nP1,CATV 18 6,PWR 22 0\nP2,,PWR 40 0\n";
/// let table = PoleTable::from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
///
/// let report = BatchRunner::new(AnalyzerConfig::default()).run(&table);
/// assert_eq!(report.metrics.total_poles, 2);
/// assert_eq!(report.metrics.make_ready_poles, 1);
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    name: String,
    analyzer: Arc<PoleAnalyzer>,
    max_concurrency: usize,
    log: LogConfig,
}

impl BatchRunner {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            name: "pole_analysis".to_string(),
            analyzer: Arc::new(PoleAnalyzer::from_config(&config)),
            max_concurrency: config.max_concurrency.max(1),
            log: config.log,
        }
    }

    /// Uses an already configured analyzer.
    pub fn with_analyzer(mut self, analyzer: PoleAnalyzer) -> Self {
        self.analyzer = Arc::new(analyzer);
        self
    }

    /// Sets the report name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn analyzer(&self) -> &PoleAnalyzer {
        &self.analyzer
    }

    /// Analyzes every pole on the current thread.
    #[instrument(skip(self, table), fields(batch.name = %self.name, batch.poles = table.pole_count()))]
    pub fn run(&self, table: &PoleTable) -> BatchReport {
        let start = Instant::now();
        let results = table
            .records()
            .map(|record| self.analyzer.analyze(record))
            .collect();
        self.finish(table, results, start)
    }

    /// Analyzes the poles in chunks on blocking tasks, at most
    /// `max_concurrency` chunks at a time. Results keep table order.
    #[instrument(skip(self, table), fields(
        batch.name = %self.name,
        batch.poles = table.pole_count(),
        batch.max_concurrency = self.max_concurrency
    ))]
    pub async fn run_parallel(&self, table: &PoleTable) -> Result<BatchReport> {
        let start = Instant::now();
        let records: Vec<RawRecord> = table.records().cloned().collect();
        let chunk_size = records
            .len()
            .div_ceil(self.max_concurrency)
            .max(MIN_CHUNK_SIZE);

        let mut tasks = JoinSet::new();
        for (index, chunk) in records.chunks(chunk_size).enumerate() {
            let chunk = chunk.to_vec();
            let analyzer = Arc::clone(&self.analyzer);
            tasks.spawn_blocking(move || {
                let results: Vec<AnalysisResult> =
                    chunk.iter().map(|record| analyzer.analyze(record)).collect();
                (index, results)
            });
        }
        debug!(batch.chunks = tasks.len(), batch.chunk_size = chunk_size, "Spawned analysis chunks");

        let mut chunks = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let chunk = joined
                .map_err(|e| PoleError::Internal(format!("Analysis task failed: {e}")))?;
            chunks.push(chunk);
        }
        chunks.sort_by_key(|(index, _)| *index);

        let results = chunks.into_iter().flat_map(|(_, results)| results).collect();
        Ok(self.finish(table, results, start))
    }

    fn finish(&self, table: &PoleTable, results: Vec<AnalysisResult>, start: Instant) -> BatchReport {
        let mut report = BatchReport::new(&self.name);
        for result in results {
            report.add_result(result);
        }
        for row in table.rows() {
            if let TableRow::Rejected(rejected) = row {
                report.add_rejected(rejected.clone());
            }
        }
        report.metrics.execution_time_ms = start.elapsed().as_millis() as u64;

        log_table_op!(
            self.log,
            batch.name = %report.name,
            batch.poles = report.metrics.total_poles,
            batch.make_ready = report.metrics.make_ready_poles,
            batch.clear = report.metrics.clear_poles,
            batch.rejected = report.metrics.rejected_rows,
            batch.duration_ms = report.metrics.execution_time_ms,
            batch.make_ready_rate = %format!("{:.2}%", report.metrics.make_ready_rate()),
            "Pole analysis completed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::CsvOptions;

    fn table(rows: usize) -> PoleTable {
        let mut data = String::from("HANDLE,CATV,LWSTPWR\n");
        for i in 0..rows {
            let power = if i % 3 == 0 { "PWR 22 0" } else { "PWR 40 0" };
            data.push_str(&format!("P{i},CATV 18 6,{power}\n"));
        }
        PoleTable::from_reader(data.as_bytes(), &CsvOptions::default()).unwrap()
    }

    #[test]
    fn test_run_counts() {
        let report = BatchRunner::new(AnalyzerConfig::default()).run(&table(9));
        assert_eq!(report.metrics.total_poles, 9);
        assert_eq!(report.metrics.make_ready_poles, 3);
        assert_eq!(report.metrics.reasons_by_check.get("lowest_power"), Some(&3));
    }

    #[test]
    fn test_rejected_rows_are_reported() {
        let data = "HANDLE,CATV\nP1,18 6\n,18 6\n";
        let table = PoleTable::from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
        let report = BatchRunner::new(AnalyzerConfig::default()).run(&table);
        assert_eq!(report.metrics.rejected_rows, 1);
        assert_eq!(report.rejected[0].row, 2);
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let table = table(500);
        let runner = BatchRunner::new(AnalyzerConfig::default().with_max_concurrency(4));

        let sequential = runner.run(&table);
        let parallel = runner.run_parallel(&table).await.unwrap();

        assert_eq!(sequential.results, parallel.results);
        assert_eq!(sequential.metrics.make_ready_poles, parallel.metrics.make_ready_poles);
    }

    #[tokio::test]
    async fn test_parallel_empty_table() {
        let table = table(0);
        let report = BatchRunner::new(AnalyzerConfig::default())
            .run_parallel(&table)
            .await
            .unwrap();
        assert!(report.is_empty());
    }
}
