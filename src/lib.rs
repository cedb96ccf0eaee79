//! # REBECCA - Battery Cycling Analysis
//!
//! `rebecca` turns the time series exported by a battery cycler into the
//! quantities used to judge a cell: capacity per cycle, Coulombic efficiency
//! and differential capacity (dQ/dV).
//!
//! ## Pipeline
//!
//! ```text
//! export(s) ──reader──▶ SampleTable ──analysis::analyze──▶ CycleReport ──sink──▶ files
//!             (stitch)    (OCV removal)   (segment, classify,            (cycles/, main_out/)
//!                                          capacity, CE, dQ/dV)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rebecca::analysis::{analyze, AnalysisConfig};
//! use rebecca::reader::{read_table, ReaderConfig};
//! use rebecca::sink::{write_report, CsvDirectorySink};
//!
//! let table = read_table("cell_01_GCPL_C01.txt", &ReaderConfig::default())?;
//! let report = analyze(table, &AnalysisConfig::default())?;
//!
//! println!("Discharge capacities: {:?}", report.capacities.discharge);
//! println!("Coulombic efficiency: {:?}", report.efficiency.values);
//!
//! let mut sink = CsvDirectorySink::create("cell_01")?;
//! write_report(&report, &mut sink)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Conventions
//!
//! | Quantity | Unit | Sign |
//! |----------|------|------|
//! | time | s | |
//! | voltage | V | |
//! | dq, capacity | mA·h | negative while discharging in the export, positive magnitudes in results |
//! | Coulombic efficiency | % | NaN when the discharge capacity is zero |
//!
//! A half-cycle is discharging when its net transferred charge is negative
//! and charging otherwise (exactly zero counts as charging).
//!
//! ## Architecture
//!
//! - [`table`]: validated, ordered sample rows and OCV removal
//! - [`reader`]: EC-Lab text / CSV loading and multi-file stitching
//! - [`analysis`]: segmentation, classification, capacity, efficiency, derivatives
//! - [`sink`]: output interface and the CSV directory writer

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod reader;
pub mod sink;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::analysis::{
        analyze, AnalysisConfig, AnalysisError, CapacitySeries, CurvePoint, CycleCurve, CycleId,
        CycleKind, CycleReport, Derivative, DerivativeError, DerivativePoint, EfficiencySeries,
        Smoothing,
    };
    pub use crate::reader::{read_stitched, read_table, InputSelection, ReaderConfig, ReaderError, StitchOrder};
    pub use crate::sink::{write_report, CsvDirectorySink, MemorySink, OutputSink, RunSummary, SinkError};
    pub use crate::table::{Sample, SampleTable, TableError};
}
