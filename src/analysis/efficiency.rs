use serde::{Deserialize, Serialize};

/// Coulombic efficiency per positional charge/discharge pair (%)
///
/// Pair `i` is the i-th charge with the i-th discharge in encounter order.
/// Trailing cycles without a partner are dropped and counted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySeries {
    /// `100 * charge[i] / discharge[i]`; NaN where the discharge capacity is zero
    pub values: Vec<f64>,
    /// Pair positions whose discharge capacity was zero
    pub zero_discharge: Vec<usize>,
    /// Charge capacities beyond the last pair
    pub unmatched_charge: usize,
    /// Discharge capacities beyond the last pair
    pub unmatched_discharge: usize,
}

impl EfficiencySeries {
    /// Number of pairs
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no pair could be formed
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when unmatched cycles were discarded
    pub fn is_truncated(&self) -> bool {
        self.unmatched_charge > 0 || self.unmatched_discharge > 0
    }
}

/// Compute Coulombic efficiency from charge and discharge capacity series.
///
/// Only `min(charge.len(), discharge.len())` pairs are produced. A zero
/// discharge capacity yields NaN at that position instead of an infinite or
/// faulting division, and its position is recorded.
pub fn coulombic_efficiency(charge: &[f64], discharge: &[f64]) -> EfficiencySeries {
    let pairs = charge.len().min(discharge.len());
    let mut series = EfficiencySeries {
        values: Vec::with_capacity(pairs),
        zero_discharge: Vec::new(),
        unmatched_charge: charge.len() - pairs,
        unmatched_discharge: discharge.len() - pairs,
    };

    for (i, (&ch, &dis)) in charge.iter().zip(discharge).enumerate() {
        if dis == 0.0 {
            series.zero_discharge.push(i);
            series.values.push(f64::NAN);
        } else {
            series.values.push(100.0 * ch / dis);
        }
    }

    series
}
