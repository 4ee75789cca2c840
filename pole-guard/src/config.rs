//! Clearance thresholds and analyzer configuration.
//!
//! Thresholds are optional overrides: an unset value resolves to its default,
//! an explicitly set value (including `0`) is used as given.
//!
//! ```toml
//! [clearance]
//! power_clearance = 40
//! circuit_clearance = 12
//! streetlight_bottom_clearance = 4
//! transformer_clearance = 30
//!
//! [batch]
//! max_concurrency = 8
//! ```

use crate::attachments::Inches;
use crate::error::{PoleError, Result};
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_POWER_CLEARANCE: u32 = 40;
pub const DEFAULT_CIRCUIT_CLEARANCE: u32 = 12;
pub const DEFAULT_STREETLIGHT_BOTTOM_CLEARANCE: u32 = 4;
pub const DEFAULT_TRANSFORMER_CLEARANCE: u32 = 30;

/// Minimum clearances, in inches, between the proposed attachment and
/// existing obstacles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClearanceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_clearance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_clearance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streetlight_bottom_clearance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformer_clearance: Option<u32>,
}

fn inches(value: u32) -> Inches {
    Inches::try_from(value).unwrap_or(Inches::MAX)
}

impl ClearanceConfig {
    /// Creates a configuration with every threshold at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clearance below the lowest power attachment.
    pub fn power_clearance(&self) -> Inches {
        inches(self.power_clearance.unwrap_or(DEFAULT_POWER_CLEARANCE))
    }

    /// Clearance below street-light drip loops and traffic circuits.
    pub fn circuit_clearance(&self) -> Inches {
        inches(self.circuit_clearance.unwrap_or(DEFAULT_CIRCUIT_CLEARANCE))
    }

    /// Clearance below the bottom of a street light.
    pub fn streetlight_bottom_clearance(&self) -> Inches {
        inches(
            self.streetlight_bottom_clearance
                .unwrap_or(DEFAULT_STREETLIGHT_BOTTOM_CLEARANCE),
        )
    }

    /// Clearance below the bottom of the lowest transformer.
    pub fn transformer_clearance(&self) -> Inches {
        inches(
            self.transformer_clearance
                .unwrap_or(DEFAULT_TRANSFORMER_CLEARANCE),
        )
    }

    pub fn with_power_clearance(mut self, inches: u32) -> Self {
        self.power_clearance = Some(inches);
        self
    }

    pub fn with_circuit_clearance(mut self, inches: u32) -> Self {
        self.circuit_clearance = Some(inches);
        self
    }

    pub fn with_streetlight_bottom_clearance(mut self, inches: u32) -> Self {
        self.streetlight_bottom_clearance = Some(inches);
        self
    }

    pub fn with_transformer_clearance(mut self, inches: u32) -> Self {
        self.transformer_clearance = Some(inches);
        self
    }

    /// Layers `overrides` on top of `self`; values set in `overrides` win.
    pub fn merge(self, overrides: ClearanceConfig) -> Self {
        Self {
            power_clearance: overrides.power_clearance.or(self.power_clearance),
            circuit_clearance: overrides.circuit_clearance.or(self.circuit_clearance),
            streetlight_bottom_clearance: overrides
                .streetlight_bottom_clearance
                .or(self.streetlight_bottom_clearance),
            transformer_clearance: overrides
                .transformer_clearance
                .or(self.transformer_clearance),
        }
    }

    /// Reads the `[clearance]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(ConfigFile::parse(content)?.clearance)
    }

    /// Reads the `[clearance]` table of a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(ConfigFile::load(path.as_ref())?.clearance)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    clearance: ClearanceConfig,
    batch: BatchSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BatchSection {
    max_concurrency: Option<usize>,
}

impl ConfigFile {
    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PoleError::configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        debug!(config.path = %path.display(), "Loaded configuration file");
        Self::parse(&content)
    }
}

/// Everything a [`PoleAnalyzer`](crate::core::PoleAnalyzer) and
/// [`BatchRunner`](crate::core::BatchRunner) need for a run.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub clearance: ClearanceConfig,
    pub log: LogConfig,
    /// Upper bound on concurrently analyzed chunks in parallel runs
    pub max_concurrency: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            clearance: ClearanceConfig::default(),
            log: LogConfig::default(),
            max_concurrency: num_cpus::get(),
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clearance(mut self, clearance: ClearanceConfig) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Sets the concurrency bound; `0` is raised to `1`.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Reads `[clearance]` and `[batch]` from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(Self::from_file_contents(ConfigFile::parse(content)?))
    }

    /// Reads `[clearance]` and `[batch]` from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_file_contents(ConfigFile::load(path.as_ref())?))
    }

    fn from_file_contents(file: ConfigFile) -> Self {
        let mut config = Self::default().with_clearance(file.clearance);
        if let Some(max) = file.batch.max_concurrency {
            config = config.with_max_concurrency(max);
        }
        config
    }
}
