//! # Cycler Export Reader
//!
//! Loads decoded cycler exports (EC-Lab text or CSV) into a
//! [`SampleTable`]. Decoding the vendor binary `.mpr` format is left to
//! external tools; this module consumes their tabular output.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rebecca::reader::{read_table, ReaderConfig};
//!
//! let table = read_table("cell_01_GCPL_C01.txt", &ReaderConfig::default())?;
//! println!("{} samples", table.len());
//! # Ok::<(), rebecca::reader::ReaderError>(())
//! ```
//!
//! Files starting with the `EC-Lab ASCII FILE` banner have their preamble
//! skipped using the `Nb header lines` count.

mod columns;
mod config;
mod error;
mod stitch;


pub use config::{ColumnNames, ReaderConfig};
pub use error::ReaderError;
pub use stitch::{read_stitched, InputSelection, StitchOrder};

use std::io::Read;
use std::path::Path;

use log::debug;

use crate::table::SampleTable;
use columns::ColumnIndex;

const ECLAB_BANNER: &str = "EC-Lab ASCII FILE";

/// Load one export file
pub fn read_table<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<SampleTable, ReaderError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    // EC-Lab writes Latin-1 unit symbols in some headers
    let content = String::from_utf8_lossy(&bytes);
    from_str(&content, config.delimiter_for(path), config)
}

/// Parse an export from any reader
pub fn from_reader<R: Read>(mut reader: R, delimiter: u8, config: &ReaderConfig) -> Result<SampleTable, ReaderError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_str(&String::from_utf8_lossy(&bytes), delimiter, config)
}

/// Parse export text
pub fn from_str(content: &str, delimiter: u8, config: &ReaderConfig) -> Result<SampleTable, ReaderError> {
    let body = strip_preamble(content)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(body.as_bytes());

    let headers = csv_reader.headers()?.clone();
    let index = ColumnIndex::resolve(&headers, &config.columns)?;

    let mut samples = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        samples.push(index.parse_row(&record, i + 1)?);
    }
    debug!("Parsed {} rows", samples.len());

    Ok(SampleTable::from_samples(samples)?)
}

/// Skip the EC-Lab preamble, leaving the column header as the first line.
fn strip_preamble(content: &str) -> Result<&str, ReaderError> {
    let mut lines = content.lines();
    match lines.next() {
        Some(first) if first.trim_start().starts_with(ECLAB_BANNER) => {}
        _ => return Ok(content),
    }

    let header_lines = lines
        .next()
        .and_then(|line| line.split(':').nth(1))
        .and_then(|count| count.trim().parse::<usize>().ok())
        .ok_or_else(|| ReaderError::InvalidFormat("missing 'Nb header lines' after EC-Lab banner".to_string()))?;

    if header_lines < 2 {
        return Err(ReaderError::InvalidFormat(format!(
            "header line count {} too small",
            header_lines
        )));
    }

    // The last header line holds the column names
    let mut offset = 0;
    for _ in 0..header_lines - 1 {
        match content[offset..].find('\n') {
            Some(pos) => offset += pos + 1,
            None => {
                return Err(ReaderError::InvalidFormat(format!(
                    "file ends before {} header lines",
                    header_lines
                )))
            }
        }
    }

    Ok(&content[offset..])
}
