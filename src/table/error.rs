/// Errors returned when a sample violates the table contract
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// A numeric field holds NaN or infinity
    #[error("sample {row}: {field} must be finite, got {value}")]
    NonFinite {
        /// Zero-based row position in the table
        row: usize,
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },
}
