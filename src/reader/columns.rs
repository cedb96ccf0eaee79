use csv::StringRecord;

use super::{ColumnNames, ReaderError};
use crate::table::Sample;

/// Positions of the sample columns within a header row
#[derive(Debug)]
pub(super) struct ColumnIndex<'a> {
    names: &'a ColumnNames,
    time: usize,
    voltage: usize,
    control: Option<usize>,
    step: Option<usize>,
    dq: usize,
    capacity: usize,
    cumulative_capacity: Option<usize>,
    half_cycle: usize,
}

impl<'a> ColumnIndex<'a> {
    /// Locate every column; exact header match first, then case-insensitive.
    pub(super) fn resolve(headers: &StringRecord, names: &'a ColumnNames) -> Result<Self, ReaderError> {
        let required = |name: &str| find(headers, name).ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()));

        Ok(Self {
            names,
            time: required(&names.time)?,
            voltage: required(&names.voltage)?,
            control: find(headers, &names.control),
            step: find(headers, &names.step),
            dq: required(&names.dq)?,
            capacity: required(&names.capacity)?,
            cumulative_capacity: find(headers, &names.cumulative_capacity),
            half_cycle: required(&names.half_cycle)?,
        })
    }

    /// Build a sample from one data record (`row` is 1-based, for messages)
    pub(super) fn parse_row(&self, record: &StringRecord, row: usize) -> Result<Sample, ReaderError> {
        let float = |index: usize, name: &str| parse_float(record, index, name, row);
        let optional_float = |index: Option<usize>, name: &str| match index {
            Some(index) => float(index, name),
            None => Ok(0.0),
        };
        let names = self.names;

        let step = match self.step {
            Some(index) => parse_int(record, index, &names.step, row)?,
            None => 0,
        };

        Ok(Sample {
            time_s: float(self.time, &names.time)?,
            voltage: float(self.voltage, &names.voltage)?,
            control: optional_float(self.control, &names.control)?,
            step,
            dq: float(self.dq, &names.dq)?,
            capacity: float(self.capacity, &names.capacity)?,
            cumulative_capacity: optional_float(self.cumulative_capacity, &names.cumulative_capacity)?,
            half_cycle: parse_int(record, self.half_cycle, &names.half_cycle, row)?,
        })
    }
}

fn find(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .or_else(|| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name)))
}

fn cell<'r>(record: &'r StringRecord, index: usize, column: &str, row: usize) -> Result<&'r str, ReaderError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| invalid(row, column, ""))
}

fn parse_float(record: &StringRecord, index: usize, column: &str, row: usize) -> Result<f64, ReaderError> {
    let raw = cell(record, index, column, row)?;
    raw.parse::<f64>()
        // Some EC-Lab locales export decimal commas
        .or_else(|_| raw.replace(',', ".").parse::<f64>())
        .map_err(|_| invalid(row, column, raw))
}

fn parse_int(record: &StringRecord, index: usize, column: &str, row: usize) -> Result<i64, ReaderError> {
    let raw = cell(record, index, column, row)?;
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    // Exports written through a float column ("3.0")
    match parse_float(record, index, column, row) {
        Ok(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Ok(value as i64),
        _ => Err(invalid(row, column, raw)),
    }
}

fn invalid(row: usize, column: &str, value: &str) -> ReaderError {
    ReaderError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}
