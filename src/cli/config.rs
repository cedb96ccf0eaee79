//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep settings in a file:
//!
//! ```toml
//! # rebecca.toml
//! [analysis]
//! ocv_removal = true
//! stitch_multiple_files = true
//! dqdv_tolerance = 0.001
//! smoothing = "rolling3"
//! compute_derivatives = true
//!
//! [input]
//! order = "file-name"
//! filter = "_GCPL_"
//! delimiter = "\t"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use rebecca::analysis::{AnalysisConfig, Smoothing};
use rebecca::reader::StitchOrder;

/// Root configuration structure for rebecca.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisSection,

    /// Input selection and parsing settings.
    #[serde(default)]
    pub input: InputSection,
}

/// `[analysis]` table; unset keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisSection {
    /// Drop rows with zero incremental charge.
    pub ocv_removal: Option<bool>,

    /// Stitch all selected inputs.
    pub stitch_multiple_files: Option<bool>,

    /// De-duplication tolerance for derivatives.
    pub dqdv_tolerance: Option<f64>,

    /// Derivative smoothing.
    pub smoothing: Option<Smoothing>,

    /// Compute dQ/dV and dV/dQ.
    pub compute_derivatives: Option<bool>,
}

/// `[input]` table.
#[derive(Debug, Default, Deserialize)]
pub struct InputSection {
    /// Stitching order.
    pub order: Option<StitchOrder>,

    /// File-name filter for stitching.
    pub filter: Option<String>,

    /// Field delimiter.
    pub delimiter: Option<char>,
}

impl AnalysisSection {
    /// Overlay the values present in the file onto `base`.
    pub fn apply(&self, mut base: AnalysisConfig) -> AnalysisConfig {
        if let Some(v) = self.ocv_removal {
            base.ocv_removal = v;
        }
        if let Some(v) = self.stitch_multiple_files {
            base.stitch_multiple_files = v;
        }
        if let Some(v) = self.dqdv_tolerance {
            base.dqdv_tolerance = v;
        }
        if let Some(v) = self.smoothing {
            base.smoothing = v;
        }
        if let Some(v) = self.compute_derivatives {
            base.compute_derivatives = v;
        }
        base
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [analysis]
            ocv_removal = false
            stitch_multiple_files = false
            dqdv_tolerance = 0.005
            smoothing = "none"
            compute_derivatives = false

            [input]
            order = "file-name"
            filter = "_GCPL_"
            delimiter = ";"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.analysis.ocv_removal, Some(false));
        assert_eq!(config.analysis.dqdv_tolerance, Some(0.005));
        assert_eq!(config.analysis.smoothing, Some(Smoothing::None));
        assert_eq!(config.input.order, Some(StitchOrder::FileName));
        assert_eq!(config.input.filter.as_deref(), Some("_GCPL_"));
        assert_eq!(config.input.delimiter, Some(';'));

        let resolved = config.analysis.apply(AnalysisConfig::default());
        assert!(!resolved.ocv_removal);
        assert!(!resolved.stitch_multiple_files);
        assert!(!resolved.compute_derivatives);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [analysis]
            smoothing = "rolling3"
        "#;

        let config = Config::from_str(toml).unwrap();
        let resolved = config.analysis.apply(AnalysisConfig::default());
        assert_eq!(resolved.smoothing, Smoothing::Rolling3);
        assert_eq!(resolved.dqdv_tolerance, AnalysisConfig::default().dqdv_tolerance);
        assert_eq!(config.input.order, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.analysis.apply(AnalysisConfig::default()), AnalysisConfig::default());
    }

    #[test]
    fn test_unknown_smoothing_rejected() {
        let toml = r#"
            [analysis]
            smoothing = "savitzky-golay"
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
