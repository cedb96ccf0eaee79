use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "colorized_output")]
use console::style;

use rebecca::analysis::{segment, CycleKind};
use rebecca::reader::{read_table, ReaderConfig};
use rebecca::table::SampleTable;

/// Summary of one export, as shown by `rebecca info`
struct TableInfo {
    file: String,
    rows: usize,
    ocv_rows: usize,
    duration_h: f64,
    voltage_range: Option<(f64, f64)>,
    half_cycles: usize,
    discharge: usize,
    charge: usize,
}

impl TableInfo {
    fn new(file: String, mut table: SampleTable) -> Self {
        let rows = table.len();
        let duration_h = match (table.samples().first(), table.samples().last()) {
            (Some(first), Some(last)) => (last.time_s - first.time_s) / 3600.0,
            _ => 0.0,
        };
        let voltage_range = table.iter().map(|s| s.voltage).fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        });

        // Segment the way `analyze` does by default
        let ocv_rows = table.remove_open_circuit();
        let half_cycles = segment(table.samples());
        let discharge = half_cycles.iter().filter(|h| h.kind() == CycleKind::Discharging).count();

        Self {
            file,
            rows,
            ocv_rows,
            duration_h,
            voltage_range,
            half_cycles: half_cycles.len(),
            discharge,
            charge: half_cycles.len() - discharge,
        }
    }

    fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Cycler Export Information").bold().cyan()));
            output.push_str(&format!("{}\n", style("=========================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("File").bold(), self.file));
            output.push_str(&format!("  Rows: {}\n", style(self.rows).green()));
            output.push_str(&format!("  Open-circuit rows: {}\n", style(self.ocv_rows).yellow()));
            output.push_str(&format!("  Duration: {:.2} h\n", self.duration_h));
            if let Some((lo, hi)) = self.voltage_range {
                output.push_str(&format!("  Voltage: {:.4} V .. {:.4} V\n", lo, hi));
            }
            output.push_str(&format!(
                "  Half-cycles: {} ({} discharge, {} charge)\n",
                style(self.half_cycles).bold(),
                style(self.discharge).red(),
                style(self.charge).green()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cycler Export Information")?;
        writeln!(f, "=========================")?;
        writeln!(f, "File: {}", self.file)?;
        writeln!(f)?;
        writeln!(f, "  Rows: {}", self.rows)?;
        writeln!(f, "  Open-circuit rows: {}", self.ocv_rows)?;
        writeln!(f, "  Duration: {:.2} h", self.duration_h)?;
        if let Some((lo, hi)) = self.voltage_range {
            writeln!(f, "  Voltage: {:.4} V .. {:.4} V", lo, hi)?;
        }
        writeln!(
            f,
            "  Half-cycles: {} ({} discharge, {} charge)",
            self.half_cycles, self.discharge, self.charge
        )
    }
}

/// Display information about a cycler export
pub fn run(file: PathBuf, delimiter: Option<u8>) -> Result<()> {
    if !file.exists() {
        bail!("File does not exist: {}", file.display());
    }

    let config = ReaderConfig {
        delimiter,
        ..Default::default()
    };
    let table = read_table(&file, &config)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let info = TableInfo::new(file.display().to_string(), table);
    print!("{}", info.format_colored());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebecca::table::Sample;

    #[test]
    fn test_table_info_counts() {
        let samples = vec![
            Sample::new(0.0, 3.0, 0).with_charge(0.0, 0.0),
            Sample::new(3600.0, 2.9, 1).with_charge(-0.5, -0.5),
            Sample::new(7200.0, 2.8, 1).with_charge(-0.5, -1.0),
            Sample::new(10800.0, 3.1, 2).with_charge(0.7, 0.7),
        ];
        let table = SampleTable::from_samples(samples).unwrap();
        let info = TableInfo::new("cell.txt".to_string(), table);

        assert_eq!(info.rows, 4);
        assert_eq!(info.ocv_rows, 1);
        assert_eq!(info.half_cycles, 2);
        assert_eq!(info.discharge, 1);
        assert_eq!(info.charge, 1);
        assert!((info.duration_h - 3.0).abs() < 1e-12);
        assert_eq!(info.voltage_range, Some((2.8, 3.1)));
        assert!(info.to_string().contains("Half-cycles: 2 (1 discharge, 1 charge)"));
    }
}
