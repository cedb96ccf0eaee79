use serde::{Deserialize, Serialize};

use super::{CycleKind, HalfCycle};

/// Peak capacity of every half-cycle, split by kind in encounter order (mA·h)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacitySeries {
    /// Discharge capacities, one per discharging half-cycle
    pub discharge: Vec<f64>,
    /// Charge capacities, one per charging half-cycle
    pub charge: Vec<f64>,
}

impl CapacitySeries {
    /// Aggregate peak capacities over segmented half-cycles
    pub fn from_half_cycles(half_cycles: &[HalfCycle<'_>]) -> Self {
        let mut series = Self::default();
        for half_cycle in half_cycles {
            let capacity = half_cycle.peak_capacity();
            match half_cycle.kind() {
                CycleKind::Discharging => series.discharge.push(capacity),
                CycleKind::Charging => series.charge.push(capacity),
            }
        }
        series
    }

    /// Capacities of one kind
    pub fn of(&self, kind: CycleKind) -> &[f64] {
        match kind {
            CycleKind::Charging => &self.charge,
            CycleKind::Discharging => &self.discharge,
        }
    }

    /// Total number of half-cycles aggregated
    pub fn len(&self) -> usize {
        self.discharge.len() + self.charge.len()
    }

    /// True when no half-cycles were aggregated
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest capacity of one kind, used for a common axis across cycle plots
    pub fn max_of(&self, kind: CycleKind) -> Option<f64> {
        self.of(kind).iter().copied().reduce(f64::max)
    }
}
