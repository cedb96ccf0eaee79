use serde::{Deserialize, Serialize};

use super::derivative::{dq_dv, dv_dq, CurvePoint, Derivative, DerivativeError, DerivativePoint};
use super::{AnalysisConfig, CapacitySeries, CycleId, CycleKind, EfficiencySeries, HalfCycle};

/// Outcome of a derivative computation for one half-cycle
pub type DerivativeResult = Result<Vec<DerivativePoint>, DerivativeError>;

/// Voltage/capacity curve of one half-cycle and its derivatives
#[derive(Debug, Clone, PartialEq)]
pub struct CycleCurve {
    /// Kind and 1-based number of this half-cycle
    pub id: CycleId,
    /// Half-cycle index reported by the instrument
    pub half_cycle_index: i64,
    /// Points in acquisition order, capacity as a positive magnitude
    pub points: Vec<CurvePoint>,
    /// dQ/dV, `None` when derivatives were disabled
    pub dq_dv: Option<DerivativeResult>,
    /// dV/dQ, `None` when derivatives were disabled
    pub dv_dq: Option<DerivativeResult>,
}

impl CycleCurve {
    pub(crate) fn from_half_cycle(id: CycleId, half_cycle: &HalfCycle<'_>, config: &AnalysisConfig) -> Self {
        let sign = half_cycle.capacity_sign();
        let points: Vec<CurvePoint> = half_cycle
            .samples()
            .iter()
            .map(|s| CurvePoint::new(sign * s.capacity, s.voltage))
            .collect();

        let (dq_dv, dv_dq) = if config.compute_derivatives {
            let smooth = |result: DerivativeResult| {
                result.map(|mut values| {
                    config.smoothing.apply(&mut values);
                    values
                })
            };
            (
                Some(smooth(dq_dv(&points, config.dqdv_tolerance))),
                Some(smooth(dv_dq(&points, config.dqdv_tolerance))),
            )
        } else {
            (None, None)
        };

        Self {
            id,
            half_cycle_index: half_cycle.index(),
            points,
            dq_dv,
            dv_dq,
        }
    }

    /// Kind of this half-cycle
    pub fn kind(&self) -> CycleKind {
        self.id.kind
    }
}

/// A derivative that could not be computed for one half-cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDerivative {
    /// Half-cycle label, e.g. `charge_3`
    pub cycle: String,
    /// `dQdV` or `dVdQ`
    pub derivative: String,
    /// Human-readable reason
    pub reason: String,
}

/// Curves picked out of a report by cycle number
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    /// Curves found, in the order requested
    pub curves: Vec<&'a CycleCurve>,
    /// Requested numbers with no matching half-cycle
    pub missing: Vec<usize>,
}

/// Everything derived from one sample table
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Rows deleted by OCV removal
    pub removed_ocv_rows: usize,
    /// Rows that went into segmentation
    pub analyzed_rows: usize,
    /// Voltage against capacity referenced to test start (`-(Q-Qo)`), over
    /// every row including the ones OCV removal dropped
    pub full_curve: Vec<CurvePoint>,
    /// Peak capacities per kind
    pub capacities: CapacitySeries,
    /// Coulombic efficiency per positional pair
    pub efficiency: EfficiencySeries,
    /// One curve per half-cycle, in encounter order
    pub curves: Vec<CycleCurve>,
}

impl CycleReport {
    /// Number of half-cycles found
    pub fn half_cycle_count(&self) -> usize {
        self.curves.len()
    }

    /// Curves of one kind in encounter order
    pub fn curves_of(&self, kind: CycleKind) -> impl Iterator<Item = &CycleCurve> {
        self.curves.iter().filter(move |c| c.kind() == kind)
    }

    /// Look up a curve by its identifier
    pub fn curve(&self, id: CycleId) -> Option<&CycleCurve> {
        self.curves.iter().find(|c| c.id == id)
    }

    /// Pick the curves of the given 1-based cycle numbers.
    ///
    /// Numbers with no matching half-cycle are returned in `missing`.
    pub fn select(&self, kind: CycleKind, numbers: &[usize]) -> Selection<'_> {
        let mut selection = Selection {
            curves: Vec::with_capacity(numbers.len()),
            missing: Vec::new(),
        };
        for &number in numbers {
            match self.curve(CycleId::new(kind, number)) {
                Some(curve) => selection.curves.push(curve),
                None => selection.missing.push(number),
            }
        }
        selection
    }

    /// Derivatives that failed, with the reason
    pub fn skipped_derivatives(&self) -> Vec<SkippedDerivative> {
        let mut skipped = Vec::new();
        for curve in &self.curves {
            let derivatives = [(Derivative::DqDv, &curve.dq_dv), (Derivative::DvDq, &curve.dv_dq)];
            for (derivative, result) in derivatives {
                if let Some(Err(err)) = result {
                    skipped.push(SkippedDerivative {
                        cycle: curve.id.to_string(),
                        derivative: derivative.suffix().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        skipped
    }
}
