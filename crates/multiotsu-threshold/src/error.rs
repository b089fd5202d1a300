//! Error types for multiotsu-threshold

use thiserror::Error;

/// Errors that can occur during threshold search and rendering
#[derive(Debug, Error)]
pub enum ThresholdError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] multiotsu_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// No requested region count admits a partition with every region
    /// non-empty
    #[error("no valid partition: every candidate left a region empty")]
    NoValidPartition,

    /// Region count outside {2, 3, 4}, or a palette sized for a different
    /// region count
    #[error("unsupported region count: {0}")]
    UnsupportedRegionCount(String),
}

/// Result type for threshold operations
pub type ThresholdResult<T> = Result<T, ThresholdError>;
