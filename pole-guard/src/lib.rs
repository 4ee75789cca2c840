//! # pole-guard - Make-Ready Analysis for Utility Poles
//!
//! pole-guard reads field-survey tables of utility pole attachments (power,
//! communication lines, street lights, traffic circuits, transformers) and
//! decides, for every pole, whether a new communication attachment can be
//! installed at its proposed height or whether make-ready work is required
//! first.
//!
//! ## Overview
//!
//! Survey crews record attachments as free text such as `"CATV 18 6"` or
//! `"STLT BTM 25 10/TRANS BTM 28 0"`. pole-guard:
//!
//! 1. parses each cell into named heights in inches ([`attachments`]),
//! 2. classifies every reading into one attachment category using ordered
//!    keyword rules,
//! 3. finds the binding attachment of each category (lowest obstacle, highest
//!    communication line),
//! 4. computes the proposed height of attachment (PHOA) and runs the
//!    clearance checks ([`clearance`]),
//! 5. writes the table back with `MR` and `PHOA` columns ([`sources`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use pole_guard::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let data = "\
//! HANDLE,TYPE,CATV,LWSTPWR,STLT
//! 'P-100',JNT,CATV 18 6,PWR 22 0,
//! 'P-101',JNT,,PWR 40 0,BTM 22 4
//! ";
//! let table = PoleTable::from_reader(data.as_bytes(), &CsvOptions::default())?;
//!
//! let report = BatchRunner::new(AnalyzerConfig::default()).run(&table);
//! assert_eq!(report.metrics.make_ready_poles, 2);
//!
//! let p100 = &report.results[0];
//! assert_eq!(p100.proposed_height, 234);
//! assert_eq!(p100.reasons, vec!["PHOA within 30 inches from lowest power."]);
//!
//! let mut out = Vec::new();
//! write_analyzed_table(&mut out, &table, &report.results, &CsvOptions::default())?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Configuration
//!
//! Clearance thresholds default to 40" below power, 12" below circuits and
//! street-light drip loops, 4" below street-light bottoms and 30" below
//! transformer bottoms. Each can be overridden in code or from TOML:
//!
//! ```rust
//! use pole_guard::config::ClearanceConfig;
//!
//! let config = ClearanceConfig::from_toml_str("[clearance]\npower_clearance = 30\n").unwrap();
//! assert_eq!(config.power_clearance(), 30);
//! assert_eq!(config.circuit_clearance(), 12);
//! ```
//!
//! ## Logging
//!
//! pole-guard emits `tracing` events; install a subscriber with
//! [`logging::setup::init_logging`] or your own. Per-token and per-check events
//! are controlled by [`logging::LogConfig`].

pub mod attachments;
pub mod clearance;
pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod sources;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
