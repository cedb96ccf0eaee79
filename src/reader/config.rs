use std::path::Path;

use serde::{Deserialize, Serialize};

/// Header names of the columns a sample is built from.
///
/// Defaults match the EC-Lab text export of a GCPL technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Time since test start (s)
    pub time: String,
    /// Working-electrode voltage (V)
    pub voltage: String,
    /// Control signal (optional in the export)
    pub control: String,
    /// Step-program index (optional in the export)
    pub step: String,
    /// Incremental charge (mA·h)
    pub dq: String,
    /// Capacity within the current half-cycle (mA·h)
    pub capacity: String,
    /// Capacity referenced to test start (optional in the export)
    pub cumulative_capacity: String,
    /// Half-cycle index
    pub half_cycle: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            time: "time/s".to_string(),
            voltage: "Ewe/V".to_string(),
            control: "control/V/mA".to_string(),
            step: "Ns".to_string(),
            dq: "dQ/mA.h".to_string(),
            capacity: "Q charge/discharge/mA.h".to_string(),
            cumulative_capacity: "(Q-Qo)/mA.h".to_string(),
            half_cycle: "half cycle".to_string(),
        }
    }
}

/// Configuration for loading cycler exports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Field delimiter; inferred from the file extension when `None`
    pub delimiter: Option<u8>,

    /// Header names to look up
    pub columns: ColumnNames,
}

impl ReaderConfig {
    /// Delimiter to use for `path`: the configured one, else `,` for `.csv`
    /// and tab for everything else (EC-Lab `.txt`/`.mpt` exports).
    pub fn delimiter_for(&self, path: &Path) -> u8 {
        if let Some(delimiter) = self.delimiter {
            return delimiter;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
            _ => b'\t',
        }
    }
}
