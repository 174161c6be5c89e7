//! Error types for reshaping, preprocessing and evaluation.
//!
//! Polars failures are not wrapped here; they propagate through `anyhow`
//! unchanged. This enum covers the failure modes the crate itself detects.

use thiserror::Error;

/// Errors detected while configuring, fitting or applying the pipeline.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// A column required by the current operation is absent from the frame.
    #[error("Column '{column}' not found. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A column was assigned more than once across the imputer role groups.
    #[error("Column '{column}' is listed more than once in the imputer roles")]
    DuplicateColumn { column: String },

    /// A later stage refers to a column the previous stage does not produce.
    #[error("{stage} column '{column}' is not produced by the preceding stage")]
    UnroutedColumn { stage: &'static str, column: String },

    /// A column configured for imputation had no observed values at fit time.
    #[error("Column '{column}' has no observed values to fit on")]
    NoObservedValues { column: String },

    /// A column's data type cannot be handled by the stage it was routed to.
    #[error("Column '{column}' has unsupported type {dtype} for {stage}")]
    UnsupportedType {
        column: String,
        dtype: String,
        stage: &'static str,
    },

    /// Label sequences passed to the evaluation reporter are invalid.
    #[error("Invalid labels: {reason}")]
    InvalidLabels { reason: String },
}

impl PreprocessError {
    /// Build a `MissingColumn` error listing the columns that were available.
    pub fn missing_column<S: AsRef<str>>(column: &str, available: &[S]) -> Self {
        PreprocessError::MissingColumn {
            column: column.to_string(),
            available: available.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn invalid_labels(reason: impl Into<String>) -> Self {
        PreprocessError::InvalidLabels {
            reason: reason.into(),
        }
    }
}
