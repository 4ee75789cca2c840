//! Command-line front end for pole-guard.
//!
//! Argument parsing and configuration layering live here so they can be tested
//! without spawning the binary.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use pole_guard::config::{AnalyzerConfig, ClearanceConfig};
use pole_guard::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ReportFormatter};
use pole_guard::logging::setup::LoggingConfig;
use pole_guard::logging::LogConfig;
use pole_guard::sources::CsvOptions;
use std::path::PathBuf;
use tracing::Level;

/// Output format of the console report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Human,
    Json,
}

/// Analyze a pole attachment table and write it back with `MR` and `PHOA` columns.
#[derive(Parser, Debug)]
#[command(name = "pole-guard")]
#[command(about = "Make-ready clearance analysis for utility pole attachment tables")]
#[command(version)]
pub struct Args {
    /// Pole table to analyze (CSV with a HANDLE column)
    pub input: PathBuf,

    /// Where to write the analyzed table
    #[arg(short, long, default_value = "analyzed_poles.csv")]
    pub output: PathBuf,

    /// TOML file with [clearance] and [batch] tables
    #[arg(short, long, env = "POLE_GUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum inches between the PHOA and the lowest power attachment
    #[arg(long, env = "POLE_GUARD_POWER_CLEARANCE")]
    pub power_clearance: Option<u32>,

    /// Minimum inches between the PHOA and circuits or drip loops
    #[arg(long, env = "POLE_GUARD_CIRCUIT_CLEARANCE")]
    pub circuit_clearance: Option<u32>,

    /// Minimum inches between the PHOA and street-light bottoms
    #[arg(long, env = "POLE_GUARD_STREETLIGHT_BOTTOM_CLEARANCE")]
    pub streetlight_bottom_clearance: Option<u32>,

    /// Minimum inches between the PHOA and transformer bottoms
    #[arg(long, env = "POLE_GUARD_TRANSFORMER_CLEARANCE")]
    pub transformer_clearance: Option<u32>,

    /// Console report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Human)]
    pub format: ReportFormat,

    /// Maximum number of poles listed in the console report
    #[arg(long)]
    pub max_poles: Option<usize>,

    /// List clear poles as well as make-ready poles
    #[arg(long)]
    pub show_clear: bool,

    /// Analyze on blocking worker tasks instead of the main thread
    #[arg(long)]
    pub parallel: bool,

    /// Upper bound on concurrently analyzed chunks
    #[arg(long, env = "POLE_GUARD_MAX_CONCURRENCY")]
    pub max_concurrency: Option<usize>,

    /// Field delimiter of the input and output tables
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Log every classified attachment and clearance check
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Flag and environment overrides of the clearance thresholds.
    pub fn clearance_overrides(&self) -> ClearanceConfig {
        ClearanceConfig {
            power_clearance: self.power_clearance,
            circuit_clearance: self.circuit_clearance,
            streetlight_bottom_clearance: self.streetlight_bottom_clearance,
            transformer_clearance: self.transformer_clearance,
        }
    }

    /// Builds the analyzer configuration: defaults, then the `--config` file,
    /// then environment variables and flags.
    pub fn resolve_config(&self) -> Result<AnalyzerConfig> {
        let mut config = match self.config {
            Some(ref path) => AnalyzerConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => AnalyzerConfig::default(),
        };

        config.clearance = config.clearance.merge(self.clearance_overrides());
        if let Some(max) = self.max_concurrency {
            config = config.with_max_concurrency(max);
        }
        if self.verbose {
            config = config.with_log_config(LogConfig::verbose());
        }
        Ok(config)
    }

    pub fn csv_options(&self) -> Result<CsvOptions> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        Ok(CsvOptions::default().with_delimiter(self.delimiter as u8))
    }

    pub fn logging_config(&self) -> LoggingConfig {
        let config = if self.verbose {
            LoggingConfig::development()
        } else {
            LoggingConfig::default().with_level(Level::WARN)
        };
        config.with_json_format(self.json_logs)
    }

    pub fn formatter_config(&self) -> FormatterConfig {
        let base = if self.verbose {
            FormatterConfig::detailed()
        } else {
            FormatterConfig::default()
        };
        let max_poles = self.max_poles.or(base.max_poles);
        base.with_clear_poles(self.show_clear || self.verbose)
            .with_max_poles(max_poles)
    }

    pub fn formatter(&self) -> Box<dyn ReportFormatter> {
        let config = self.formatter_config();
        match self.format {
            ReportFormat::Human => Box::new(HumanFormatter::with_config(config)),
            ReportFormat::Json => Box::new(JsonFormatter::with_config(config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["pole-guard"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["poles.csv"]);
        assert_eq!(args.input, PathBuf::from("poles.csv"));
        assert_eq!(args.output, PathBuf::from("analyzed_poles.csv"));
        assert_eq!(args.format, ReportFormat::Human);
        assert!(!args.parallel);
        assert_eq!(args.csv_options().unwrap().delimiter, b',');
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["pole-guard"]).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[clearance]\npower_clearance = 30\ncircuit_clearance = 20\n\n[batch]\nmax_concurrency = 3"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = parse(&["poles.csv", "--config", &path, "--power-clearance", "36"]);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.clearance.power_clearance(), 36);
        assert_eq!(config.clearance.circuit_clearance(), 20);
        assert_eq!(config.clearance.streetlight_bottom_clearance(), 4);
        assert_eq!(config.max_concurrency, 3);
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let args = parse(&["poles.csv", "--config", "/nonexistent/pole-guard.toml"]);
        let err = args.resolve_config().unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }

    #[test]
    fn test_zero_override_is_honoured() {
        let args = parse(&["poles.csv", "--transformer-clearance", "0"]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.clearance.transformer_clearance(), 0);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let args = parse(&["poles.csv", "--delimiter", "§"]);
        assert!(args.csv_options().is_err());
    }

    #[test]
    fn test_json_format_and_pole_cap() {
        let args = parse(&["poles.csv", "--format", "json", "--max-poles", "5", "--show-clear"]);
        let config = args.formatter_config();
        assert_eq!(args.format, ReportFormat::Json);
        assert_eq!(config.max_poles, Some(5));
        assert!(config.include_clear_poles);
    }

    #[test]
    fn test_verbose_logging() {
        let args = parse(&["poles.csv", "-v", "--json-logs"]);
        let logging = args.logging_config();
        assert!(logging.json_format);
        assert_eq!(logging.crate_level, Level::DEBUG);
        assert!(args.resolve_config().unwrap().log.log_classification);
    }
}
