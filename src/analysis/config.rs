use serde::{Deserialize, Serialize};

use super::{AnalysisError, Smoothing};

/// Default voltage tolerance for dQ/dV de-duplication (V)
pub const DEFAULT_DQDV_TOLERANCE: f64 = 0.001;

/// Options controlling one analysis run.
///
/// Replaces the per-script constants of earlier tooling with a single value
/// passed explicitly into [`analyze`](super::analyze).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Drop rows with zero incremental charge before segmentation
    pub ocv_removal: bool,

    /// Concatenate all selected inputs instead of using only the first
    pub stitch_multiple_files: bool,

    /// Absolute tolerance for derivative de-duplication (V for dQ/dV, mA·h for dV/dQ)
    pub dqdv_tolerance: f64,

    /// Smoothing applied to derivative curves
    pub smoothing: Smoothing,

    /// Compute dQ/dV and dV/dQ for every half-cycle
    pub compute_derivatives: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ocv_removal: true,
            stitch_multiple_files: true,
            dqdv_tolerance: DEFAULT_DQDV_TOLERANCE,
            smoothing: Smoothing::default(),
            compute_derivatives: true,
        }
    }
}

impl AnalysisConfig {
    /// Reject settings that cannot produce a meaningful run
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.dqdv_tolerance.is_finite() || self.dqdv_tolerance < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "dqdv_tolerance must be finite and >= 0, got {}",
                self.dqdv_tolerance
            )));
        }
        Ok(())
    }
}
