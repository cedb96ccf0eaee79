use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{OutputSink, RunSummary, SinkError};
use crate::analysis::{CapacitySeries, CurvePoint, CycleId, Derivative, DerivativePoint, EfficiencySeries};

/// Per-cycle curve files
pub const CYCLES_DIR: &str = "cycles";
/// Scalar series and the run summary
pub const MAIN_OUT_DIR: &str = "main_out";

const DISCHARGE_CAPACITIES: &str = "discharge_capacities.txt";
const CHARGE_CAPACITIES: &str = "charge_capacities.txt";
const COULOMBIC_EFFICIENCIES: &str = "coulombic_efficiencies.txt";
const VOLTAGE_VS_CAPACITY: &str = "voltage_vs_capacity.csv";
const SUMMARY: &str = "summary.json";

/// Writes results as headerless CSV/text files under a root directory
#[derive(Debug)]
pub struct CsvDirectorySink {
    root: PathBuf,
    files_written: usize,
}

impl CsvDirectorySink {
    /// Create the output directories under `root`.
    ///
    /// An existing `cycles/` directory is emptied first so curve files from
    /// an earlier run cannot outlive it. Files in `main_out/` are overwritten.
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self, SinkError> {
        let root = root.as_ref().to_path_buf();
        let cycles = root.join(CYCLES_DIR);
        if cycles.is_dir() {
            debug!("Clearing previous curve files in {}", cycles.display());
            fs::remove_dir_all(&cycles)?;
        }
        fs::create_dir_all(&cycles)?;
        fs::create_dir_all(root.join(MAIN_OUT_DIR))?;
        Ok(Self { root, files_written: 0 })
    }

    /// Output root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of files written so far
    pub fn files_written(&self) -> usize {
        self.files_written
    }

    /// Path of a half-cycle curve file, e.g. `cycles/discharge_3.csv`
    pub fn curve_path(&self, id: CycleId) -> PathBuf {
        self.root.join(CYCLES_DIR).join(format!("{}.csv", id))
    }

    /// Path of a derivative file, e.g. `cycles/charge_5_dQdV.csv`
    pub fn derivative_path(&self, id: CycleId, derivative: Derivative) -> PathBuf {
        self.root
            .join(CYCLES_DIR)
            .join(format!("{}_{}.csv", id, derivative.suffix()))
    }

    /// Path of a file under `main_out/`
    pub fn main_out_path(&self, name: &str) -> PathBuf {
        self.root.join(MAIN_OUT_DIR).join(name)
    }

    /// Write `main_out/summary.json` and return its path
    pub fn write_summary(&mut self, summary: &RunSummary) -> Result<PathBuf, SinkError> {
        let path = self.main_out_path(SUMMARY);
        fs::write(&path, summary.to_json()?)?;
        self.files_written += 1;
        Ok(path)
    }

    fn write_column(&mut self, path: &Path, values: &[f64]) -> Result<(), SinkError> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        for value in values {
            writer.serialize((value,))?;
        }
        writer.flush()?;
        self.files_written += 1;
        debug!("Wrote {} values to {}", values.len(), path.display());
        Ok(())
    }

    fn write_pairs<I>(&mut self, path: &Path, pairs: I) -> Result<(), SinkError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        for pair in pairs {
            writer.serialize(pair)?;
        }
        writer.flush()?;
        self.files_written += 1;
        Ok(())
    }
}

impl OutputSink for CsvDirectorySink {
    fn emit_capacities(&mut self, capacities: &CapacitySeries) -> Result<(), SinkError> {
        let discharge = self.main_out_path(DISCHARGE_CAPACITIES);
        self.write_column(&discharge, &capacities.discharge)?;
        let charge = self.main_out_path(CHARGE_CAPACITIES);
        self.write_column(&charge, &capacities.charge)
    }

    fn emit_efficiency(&mut self, efficiency: &EfficiencySeries) -> Result<(), SinkError> {
        let path = self.main_out_path(COULOMBIC_EFFICIENCIES);
        self.write_column(&path, &efficiency.values)
    }

    fn emit_full_curve(&mut self, points: &[CurvePoint]) -> Result<(), SinkError> {
        let path = self.main_out_path(VOLTAGE_VS_CAPACITY);
        self.write_pairs(&path, points.iter().map(|p| (p.capacity, p.voltage)))
    }

    fn emit_curve(&mut self, id: CycleId, points: &[CurvePoint]) -> Result<(), SinkError> {
        let path = self.curve_path(id);
        self.write_pairs(&path, points.iter().map(|p| (p.capacity, p.voltage)))
    }

    fn emit_derivative(
        &mut self,
        id: CycleId,
        derivative: Derivative,
        points: &[DerivativePoint],
    ) -> Result<(), SinkError> {
        let path = self.derivative_path(id, derivative);
        self.write_pairs(&path, points.iter().map(|p| (p.x, p.value)))
    }
}
