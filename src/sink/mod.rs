//! # Output Sinks
//!
//! The analysis core is pure; everything it produces leaves the process
//! through an [`OutputSink`]. [`CsvDirectorySink`] writes the on-disk layout
//! used by the plotting scripts, [`MemorySink`] keeps results in memory.
//!
//! ## Directory Layout
//!
//! ```text
//! <output>/
//! ├── main_out/
//! │   ├── discharge_capacities.txt   # one value per line (mA·h)
//! │   ├── charge_capacities.txt
//! │   ├── coulombic_efficiencies.txt # percent, NaN where undefined
//! │   ├── voltage_vs_capacity.csv    # capacity,voltage over the whole test
//! │   └── summary.json               # RunSummary
//! └── cycles/                        # cleared when the sink is created
//!     ├── discharge_1.csv            # capacity,voltage
//!     ├── discharge_1_dQdV.csv       # voltage,dQ/dV
//!     ├── discharge_1_dVdQ.csv       # capacity,dV/dQ
//!     └── charge_1.csv ...
//! ```

mod csv_dir;
mod error;
mod memory;
mod summary;


pub use csv_dir::{CsvDirectorySink, CYCLES_DIR, MAIN_OUT_DIR};
pub use error::SinkError;
pub use memory::MemorySink;
pub use summary::RunSummary;

use crate::analysis::{
    CapacitySeries, CurvePoint, CycleId, CycleReport, Derivative, DerivativePoint, EfficiencySeries,
};

/// Destination for analysis results
pub trait OutputSink {
    /// Receive the per-kind capacity series
    fn emit_capacities(&mut self, capacities: &CapacitySeries) -> Result<(), SinkError>;

    /// Receive the Coulombic-efficiency series
    fn emit_efficiency(&mut self, efficiency: &EfficiencySeries) -> Result<(), SinkError>;

    /// Receive the whole-test voltage/capacity curve
    fn emit_full_curve(&mut self, points: &[CurvePoint]) -> Result<(), SinkError>;

    /// Receive the voltage/capacity curve of one half-cycle
    fn emit_curve(&mut self, id: CycleId, points: &[CurvePoint]) -> Result<(), SinkError>;

    /// Receive one derivative curve of one half-cycle
    fn emit_derivative(
        &mut self,
        id: CycleId,
        derivative: Derivative,
        points: &[DerivativePoint],
    ) -> Result<(), SinkError>;
}

/// Send every part of a report to a sink.
///
/// Derivatives that failed are not emitted; they are listed by
/// [`CycleReport::skipped_derivatives`].
pub fn write_report<S: OutputSink + ?Sized>(report: &CycleReport, sink: &mut S) -> Result<(), SinkError> {
    sink.emit_capacities(&report.capacities)?;
    sink.emit_efficiency(&report.efficiency)?;
    sink.emit_full_curve(&report.full_curve)?;

    for curve in &report.curves {
        sink.emit_curve(curve.id, &curve.points)?;

        let derivatives = [(Derivative::DqDv, &curve.dq_dv), (Derivative::DvDq, &curve.dv_dq)];
        for (derivative, result) in derivatives {
            if let Some(Ok(points)) = result {
                sink.emit_derivative(curve.id, derivative, points)?;
            }
        }
    }

    Ok(())
}
