use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisConfig, CycleReport, SkippedDerivative};

use super::SinkError;

/// Machine-readable record of one analysis run, written as `summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Software name
    pub software: String,
    /// Software version
    pub version: String,
    /// When the analysis ran
    pub generated_at: DateTime<Utc>,
    /// Input files in load order
    pub inputs: Vec<String>,
    /// Effective configuration
    pub config: AnalysisConfig,
    /// Rows dropped by OCV removal
    pub removed_ocv_rows: usize,
    /// Rows segmented
    pub analyzed_rows: usize,
    /// Number of half-cycles
    pub half_cycles: usize,
    /// Number of discharge half-cycles
    pub discharge_cycles: usize,
    /// Number of charge half-cycles
    pub charge_cycles: usize,
    /// Number of Coulombic-efficiency pairs
    pub efficiency_pairs: usize,
    /// Charge cycles without a discharge partner
    pub unmatched_charge: usize,
    /// Discharge cycles without a charge partner
    pub unmatched_discharge: usize,
    /// Pair positions with zero discharge capacity
    pub zero_discharge: Vec<usize>,
    /// Derivatives that could not be computed
    pub skipped_derivatives: Vec<SkippedDerivative>,
}

impl RunSummary {
    /// Summarize a report produced from `inputs` under `config`
    pub fn new(inputs: &[String], config: &AnalysisConfig, report: &CycleReport) -> Self {
        Self {
            software: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            inputs: inputs.to_vec(),
            config: config.clone(),
            removed_ocv_rows: report.removed_ocv_rows,
            analyzed_rows: report.analyzed_rows,
            half_cycles: report.half_cycle_count(),
            discharge_cycles: report.capacities.discharge.len(),
            charge_cycles: report.capacities.charge.len(),
            efficiency_pairs: report.efficiency.len(),
            unmatched_charge: report.efficiency.unmatched_charge,
            unmatched_discharge: report.efficiency.unmatched_discharge,
            zero_discharge: report.efficiency.zero_discharge.clone(),
            skipped_derivatives: report.skipped_derivatives(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, SinkError> {
        Ok(serde_json::from_str(json)?)
    }
}
