use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Sample;

/// Direction of current flow over a half-cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleKind {
    /// Net charge stored (zero net charge also lands here)
    Charging,
    /// Net charge released
    Discharging,
}

impl CycleKind {
    /// Classify a run of samples by the sign of its net transferred charge.
    ///
    /// Negative net charge is `Discharging`; anything else, including exactly
    /// zero, is `Charging`. Total over every run length, including 0 and 1.
    pub fn classify(samples: &[Sample]) -> Self {
        if net_charge(samples) < 0.0 {
            CycleKind::Discharging
        } else {
            CycleKind::Charging
        }
    }

    /// Lowercase label used in file names (`charge`, `discharge`)
    pub fn label(&self) -> &'static str {
        match self {
            CycleKind::Charging => "charge",
            CycleKind::Discharging => "discharge",
        }
    }
}

impl fmt::Display for CycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies a half-cycle by kind and its 1-based position among half-cycles of that kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleId {
    /// Charge or discharge
    pub kind: CycleKind,
    /// 1-based counter in encounter order
    pub number: usize,
}

impl CycleId {
    /// Create a new cycle identifier
    pub fn new(kind: CycleKind, number: usize) -> Self {
        Self { kind, number }
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.label(), self.number)
    }
}

/// A maximal contiguous run of samples sharing one half-cycle index.
///
/// Borrows its rows from the table it was segmented from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfCycle<'a> {
    ordinal: usize,
    samples: &'a [Sample],
    kind: CycleKind,
}

impl<'a> HalfCycle<'a> {
    fn new(ordinal: usize, samples: &'a [Sample]) -> Self {
        Self {
            ordinal,
            samples,
            kind: CycleKind::classify(samples),
        }
    }

    /// 0-based position of this run among all runs of the table
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Half-cycle index reported by the instrument
    pub fn index(&self) -> i64 {
        self.samples[0].half_cycle
    }

    /// Rows of this run in acquisition order
    pub fn samples(&self) -> &'a [Sample] {
        self.samples
    }

    /// Number of rows (always at least 1)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; segmentation never emits empty runs
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Charge or discharge
    pub fn kind(&self) -> CycleKind {
        self.kind
    }

    /// Sum of incremental charge over the run (mA·h)
    pub fn net_charge(&self) -> f64 {
        net_charge(self.samples)
    }

    /// Peak capacity reached during the run, as a positive magnitude.
    ///
    /// Discharge capacities are reported by the instrument as negative values
    /// and are sign-flipped here.
    pub fn peak_capacity(&self) -> f64 {
        let sign = self.capacity_sign();
        self.samples
            .iter()
            .map(|s| sign * s.capacity)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Capacity multiplier that makes this run's capacities positive
    pub fn capacity_sign(&self) -> f64 {
        match self.kind {
            CycleKind::Charging => 1.0,
            CycleKind::Discharging => -1.0,
        }
    }
}

fn net_charge(samples: &[Sample]) -> f64 {
    samples.iter().map(|s| s.dq).sum()
}

/// Partition samples into half-cycles, one per maximal run of equal index.
///
/// Runs are returned in first-seen order. A repeated index separated by a
/// different one starts a new run; nothing is merged or reordered.
pub fn segment(samples: &[Sample]) -> Vec<HalfCycle<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;

    for end in 1..=samples.len() {
        if end == samples.len() || samples[end].half_cycle != samples[start].half_cycle {
            runs.push(HalfCycle::new(runs.len(), &samples[start..end]));
            start = end;
        }
    }

    runs
}
