/// Errors that abort an analysis run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// The table held no usable samples
    #[error("no usable samples ({removed_ocv_rows} open-circuit rows removed)")]
    NoSamples {
        /// Rows dropped by OCV removal before the table turned out empty
        removed_ocv_rows: usize,
    },

    /// Configuration rejected before processing
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),
}
