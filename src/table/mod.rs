//! # Sample Table
//!
//! The decoded time series of a cycling test, held as an ordered list of
//! [`Sample`] rows.
//!
//! Row order is acquisition order and is never changed after construction.
//! The only mutation a table supports is [`SampleTable::remove_open_circuit`],
//! which drops rest periods before cycle analysis.

mod error;
mod sample;


pub use error::TableError;
pub use sample::Sample;

use log::warn;

/// Ordered, validated sequence of samples from one or more stitched exports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    samples: Vec<Sample>,
}

impl SampleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from samples in acquisition order, validating each row.
    ///
    /// A half-cycle index that decreases between consecutive rows is accepted
    /// (segmentation treats it as a new run) but logged, since it usually
    /// means inputs were stitched out of order.
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self, TableError> {
        for (row, sample) in samples.iter().enumerate() {
            sample.validate_contract(row)?;
        }

        let regressions = samples
            .windows(2)
            .filter(|pair| pair[1].half_cycle < pair[0].half_cycle)
            .count();
        if regressions > 0 {
            warn!(
                "half-cycle index decreases {} time(s); check the stitching order of the inputs",
                regressions
            );
        }

        Ok(Self { samples })
    }

    /// Concatenate tables in the order given.
    ///
    /// Stitching is purely positional: segmenting the result is identical to
    /// segmenting a single table built from the same rows in the same order.
    pub fn stitch<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = SampleTable>,
    {
        let mut stitched = Self::new();
        for table in tables {
            stitched.samples.extend(table.samples);
        }
        stitched
    }

    /// Append a sample after validating it
    pub fn push(&mut self, sample: Sample) -> Result<(), TableError> {
        sample.validate_contract(self.samples.len())?;
        self.samples.push(sample);
        Ok(())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the rows in acquisition order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over the rows in acquisition order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Consume the table and return its rows
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Number of rows where no charge moved
    pub fn open_circuit_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_open_circuit()).count()
    }

    /// Delete every row whose incremental charge is exactly zero.
    ///
    /// Returns the number of rows removed. This cannot be undone; reload the
    /// input to recover the rest periods.
    pub fn remove_open_circuit(&mut self) -> usize {
        let before = self.samples.len();
        self.samples.retain(|s| !s.is_open_circuit());
        before - self.samples.len()
    }
}

impl<'a> IntoIterator for &'a SampleTable {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
