//! Decoder configuration
//!
//! Loaded from, lowest priority first:
//! - built-in defaults
//! - a TOML file (`--config <path>` or `./shift_decoder.toml`)
//! - environment variables (`SHIFT_DECODER_TARGET`, `SHIFT_DECODER_PRECISION`)
//! - command-line flags

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tools::analyze::frequency::TARGET_IOC;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "shift_decoder.toml";

pub const TARGET_ENV: &str = "SHIFT_DECODER_TARGET";
pub const PRECISION_ENV: &str = "SHIFT_DECODER_PRECISION";

/// Largest number of decimal places an f64 score carries
pub const MAX_PRECISION: usize = 17;

/// A target must be a finite non-negative score
pub fn valid_target(target: f64) -> bool {
    target.is_finite() && target >= 0.0
}

pub fn valid_precision(precision: usize) -> bool {
    precision <= MAX_PRECISION
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Score the best shift should be closest to
    pub target: f64,

    /// Decimal places for scores and frequencies
    pub precision: usize,

    /// Print the statistics of every shift before the result
    pub verbose: bool,

    /// Number of runner-up shifts printed after the result
    pub top: usize,

    /// Print the found letters and their occurrences for every shift
    pub occurrences: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            target: TARGET_IOC,
            precision: 6,
            verbose: true,
            top: 0,
            occurrences: false,
        }
    }
}

impl DecoderConfig {
    /// Load config from file and environment. An explicit `path` must exist,
    /// the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        ensure!(
            valid_target(config.target),
            "invalid target {} in config file {}, expected a finite non-negative number",
            config.target,
            path.display()
        );
        ensure!(
            valid_precision(config.precision),
            "invalid precision {} in config file {}, expected 0..={}",
            config.precision,
            path.display(),
            MAX_PRECISION
        );
        tracing::debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }

    /// Override values from the environment. Unparseable values are ignored with a warning.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(TARGET_ENV) {
            match value.trim().parse::<f64>() {
                Ok(target) if valid_target(target) => self.target = target,
                _ => tracing::warn!(%value, "ignoring invalid {}", TARGET_ENV),
            }
        }
        if let Some(value) = lookup(PRECISION_ENV) {
            match value.trim().parse::<usize>() {
                Ok(precision) if valid_precision(precision) => self.precision = precision,
                _ => tracing::warn!(%value, "ignoring invalid {}", PRECISION_ENV),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.target, 0.065);
        assert_eq!(config.precision, 6);
        assert!(config.verbose);
        assert_eq!(config.top, 0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "precision = 3\ntop = 2").unwrap();

        let config = DecoderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.precision, 3);
        assert_eq!(config.top, 2);
        assert_eq!(config.target, 0.065);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "precision = \"many\"").unwrap();

        let err = DecoderConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DecoderConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_out_of_range_file_values_are_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "precision = 70000").unwrap();
        let err = DecoderConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid precision 70000"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target = -0.5").unwrap();
        let err = DecoderConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid target -0.5"));
    }

    #[test]
    fn test_out_of_range_env_values_are_ignored() {
        let mut config = DecoderConfig::default();
        config.apply_env(|key| match key {
            TARGET_ENV => Some("-5".to_string()),
            PRECISION_ENV => Some("70000".to_string()),
            _ => None,
        });
        assert_eq!(config, DecoderConfig::default());

        config.apply_env(|key| match key {
            PRECISION_ENV => Some("17".to_string()),
            _ => None,
        });
        assert_eq!(config.precision, MAX_PRECISION);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DecoderConfig::default();
        config.apply_env(|key| match key {
            TARGET_ENV => Some("0.07".to_string()),
            PRECISION_ENV => Some("not a number".to_string()),
            _ => None,
        });
        assert_eq!(config.target, 0.07);
        assert_eq!(config.precision, 6);
    }
}
