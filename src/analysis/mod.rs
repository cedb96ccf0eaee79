//! # Cycle Analysis
//!
//! Turns a [`SampleTable`](crate::table::SampleTable) into per-cycle
//! quantities:
//!
//! 1. **Segmentation**: contiguous runs of equal half-cycle index become
//!    [`HalfCycle`]s, in first-seen order.
//! 2. **Classification**: a run is [`CycleKind::Discharging`] when its net
//!    transferred charge is negative, [`CycleKind::Charging`] otherwise.
//! 3. **Capacity**: peak capacity magnitude per half-cycle ([`CapacitySeries`]).
//! 4. **Coulombic efficiency**: `100 * charge[i] / discharge[i]` over
//!    positional pairs ([`EfficiencySeries`]).
//! 5. **Derivatives**: dQ/dV and dV/dQ per half-cycle with optional
//!    smoothing ([`derivative`]).
//!
//! ## Example
//!
//! ```rust
//! use rebecca::analysis::{analyze, AnalysisConfig};
//! use rebecca::table::{Sample, SampleTable};
//!
//! let table = SampleTable::from_samples(vec![
//!     Sample::new(0.0, 3.4, 1).with_charge(-0.5, -0.5),
//!     Sample::new(1.0, 3.2, 1).with_charge(-0.5, -1.0),
//!     Sample::new(2.0, 3.3, 2).with_charge(0.4, 0.4),
//!     Sample::new(3.0, 3.5, 2).with_charge(0.5, 0.9),
//! ])?;
//!
//! let report = analyze(table, &AnalysisConfig::default())?;
//! assert_eq!(report.capacities.discharge, vec![1.0]);
//! assert_eq!(report.capacities.charge, vec![0.9]);
//! assert!((report.efficiency.values[0] - 90.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod capacity;
mod config;
pub mod derivative;
mod efficiency;
mod error;
mod pipeline;
mod report;
mod segment;


pub use capacity::CapacitySeries;
pub use config::{AnalysisConfig, DEFAULT_DQDV_TOLERANCE};
pub use derivative::{CurvePoint, Derivative, DerivativeError, DerivativePoint, Smoothing};
pub use efficiency::{coulombic_efficiency, EfficiencySeries};
pub use error::AnalysisError;
pub use pipeline::analyze;
pub use report::{CycleCurve, CycleReport, DerivativeResult, Selection, SkippedDerivative};
pub use segment::{segment, CycleId, CycleKind, HalfCycle};
