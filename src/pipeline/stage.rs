//! Shared plumbing for fitted pipeline stages

use anyhow::Result;
use polars::prelude::*;

use super::error::PreprocessError;

/// A pipeline stage whose parameters have been learned.
///
/// Transforming never refits: the same fitted stage produces the same output
/// layout for every frame it is applied to.
pub trait FittedStage {
    /// Short stage name used in progress output
    fn name(&self) -> &'static str;

    /// Apply the learned parameters to `df`
    fn transform(&self, df: &DataFrame) -> Result<DataFrame>;

    /// Output column names, in order, given this stage's input columns
    fn output_columns(&self, input_columns: &[String]) -> Vec<String>;
}

/// Look up a column, reporting the available columns when it is absent
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| {
        let available: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        PreprocessError::missing_column(name, &available).into()
    })
}

/// Column names of a frame as owned strings
pub fn frame_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}
