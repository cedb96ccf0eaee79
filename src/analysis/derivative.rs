//! Differential capacity (dQ/dV) and its inverse (dV/dQ).
//!
//! Both derivatives first drop consecutive points that sit within an absolute
//! tolerance of the previously retained point along the denominator axis, so
//! that no difference is taken across a near-zero step.

use serde::{Deserialize, Serialize};

/// One (capacity, voltage) point of a half-cycle curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Capacity as a positive magnitude (mA·h)
    pub capacity: f64,
    /// Cell voltage (V)
    pub voltage: f64,
}

impl CurvePoint {
    /// Create a curve point
    pub fn new(capacity: f64, voltage: f64) -> Self {
        Self { capacity, voltage }
    }
}

/// One value of a derivative curve, keyed by the abscissa it was evaluated at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivativePoint {
    /// Voltage for dQ/dV, capacity for dV/dQ
    pub x: f64,
    /// Derivative value; NaN where smoothing left it undefined
    pub value: f64,
}

/// Which derivative a curve holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Derivative {
    /// dQ/dV (mA·h/V) against voltage
    DqDv,
    /// dV/dQ (V/mA·h) against capacity
    DvDq,
}

impl Derivative {
    /// File-name suffix (`dQdV`, `dVdQ`)
    pub fn suffix(&self) -> &'static str {
        match self {
            Derivative::DqDv => "dQdV",
            Derivative::DvDq => "dVdQ",
        }
    }
}

/// Errors from derivative computation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DerivativeError {
    /// Fewer than two points survived de-duplication
    #[error("insufficient data: {retained} point(s) left after de-duplication, need at least 2")]
    InsufficientData {
        /// Points left after de-duplication
        retained: usize,
    },

    /// Tolerance is negative or not finite
    #[error("invalid de-duplication tolerance: {0}")]
    InvalidTolerance(f64),
}

/// Smoothing applied to a derivative curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    /// Leave the derivative as computed
    None,
    /// Trailing 3-point rolling mean
    #[default]
    Rolling3,
}

impl Smoothing {
    /// Apply the smoothing in place.
    ///
    /// `Rolling3` uses a trailing window, so the first two values of any curve
    /// become NaN. Curves keep their length; undefined points are not dropped.
    pub fn apply(&self, points: &mut [DerivativePoint]) {
        match self {
            Smoothing::None => {}
            Smoothing::Rolling3 => {
                let values: Vec<f64> = points.iter().map(|p| p.value).collect();
                for (point, smoothed) in points.iter_mut().zip(rolling_mean3(&values)) {
                    point.value = smoothed;
                }
            }
        }
    }
}

/// Trailing 3-point rolling mean; positions 0 and 1 are NaN.
pub fn rolling_mean3(values: &[f64]) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            if i < 2 {
                f64::NAN
            } else {
                (values[i - 2] + values[i - 1] + values[i]) / 3.0
            }
        })
        .collect()
}

/// Drop points whose `key` lies within `tolerance` of the last retained point.
///
/// The first point is always kept. Comparison is against the last *retained*
/// point, not the immediate predecessor, so slow drifts still collapse.
pub fn dedup_within<F>(
    points: &[CurvePoint],
    tolerance: f64,
    key: F,
) -> Result<Vec<CurvePoint>, DerivativeError>
where
    F: Fn(&CurvePoint) -> f64,
{
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(DerivativeError::InvalidTolerance(tolerance));
    }

    let mut retained: Vec<CurvePoint> = Vec::with_capacity(points.len());
    for point in points {
        match retained.last() {
            Some(last) if (key(point) - key(last)).abs() <= tolerance => {}
            _ => retained.push(*point),
        }
    }
    Ok(retained)
}

/// Differential capacity dQ/dV.
///
/// Forward difference at every retained point except the last, which takes
/// the backward difference against its predecessor (and so repeats the
/// previous value).
pub fn dq_dv(points: &[CurvePoint], tolerance: f64) -> Result<Vec<DerivativePoint>, DerivativeError> {
    let retained = dedup_within(points, tolerance, |p| p.voltage)?;
    let n = require_two(&retained)?;

    let slope = |a: &CurvePoint, b: &CurvePoint| (b.capacity - a.capacity) / (b.voltage - a.voltage);

    let mut out = Vec::with_capacity(n);
    for pair in retained.windows(2) {
        out.push(DerivativePoint {
            x: pair[0].voltage,
            value: slope(&pair[0], &pair[1]),
        });
    }
    out.push(DerivativePoint {
        x: retained[n - 1].voltage,
        value: slope(&retained[n - 2], &retained[n - 1]),
    });

    Ok(out)
}

/// Inverse differential dV/dQ.
///
/// Centered difference at interior points, forward at the first point and
/// backward at the last. An interior point whose neighbours share a capacity
/// (non-monotonic curve) falls back to the forward difference.
pub fn dv_dq(points: &[CurvePoint], tolerance: f64) -> Result<Vec<DerivativePoint>, DerivativeError> {
    let retained = dedup_within(points, tolerance, |p| p.capacity)?;
    let n = require_two(&retained)?;

    let slope = |a: &CurvePoint, b: &CurvePoint| (b.voltage - a.voltage) / (b.capacity - a.capacity);

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let value = if i == 0 {
            slope(&retained[0], &retained[1])
        } else if i == n - 1 {
            slope(&retained[n - 2], &retained[n - 1])
        } else if retained[i + 1].capacity != retained[i - 1].capacity {
            slope(&retained[i - 1], &retained[i + 1])
        } else {
            slope(&retained[i], &retained[i + 1])
        };
        out.push(DerivativePoint {
            x: retained[i].capacity,
            value,
        });
    }

    Ok(out)
}

fn require_two(retained: &[CurvePoint]) -> Result<usize, DerivativeError> {
    if retained.len() < 2 {
        Err(DerivativeError::InsufficientData {
            retained: retained.len(),
        })
    } else {
        Ok(retained.len())
    }
}
