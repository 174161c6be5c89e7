//! Standardization of numeric columns to zero mean and unit variance

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::PreprocessError;
use super::stage::{require_column, FittedStage};

#[derive(Debug, Clone)]
pub struct StandardScaler {
    columns: Vec<String>,
}

/// Learned centring and scale of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnScale {
    pub column: String,
    pub mean: f64,
    /// Population standard deviation, replaced by 1.0 when it is zero
    pub scale: f64,
}

impl ColumnScale {
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedScaler {
    pub scales: Vec<ColumnScale>,
}

impl StandardScaler {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Learn mean and population standard deviation per column, ignoring nulls.
    ///
    /// A constant column gets scale 1.0, so transforming only centres it.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedScaler> {
        let scales = self
            .columns
            .iter()
            .map(|name| {
                let values = numeric_values(require_column(df, name)?)?;
                if values.is_empty() {
                    return Err(PreprocessError::NoObservedValues {
                        column: name.clone(),
                    }
                    .into());
                }

                let n = values.len() as f64;
                let mean = values.iter().sum::<f64>() / n;
                let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                let std = variance.sqrt();
                let scale = if std > f64::EPSILON * mean.abs().max(1.0) {
                    std
                } else {
                    1.0
                };

                Ok(ColumnScale {
                    column: name.clone(),
                    mean,
                    scale,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FittedScaler { scales })
    }
}

fn numeric_values(column: &Column) -> Result<Vec<f64>> {
    let dtype = column.dtype();
    if !(dtype.is_primitive_numeric() || matches!(dtype, DataType::Boolean | DataType::Null)) {
        return Err(PreprocessError::UnsupportedType {
            column: column.name().to_string(),
            dtype: dtype.to_string(),
            stage: "standard scaling",
        }
        .into());
    }

    let floats = column.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

impl FittedScaler {
    fn is_scaled(&self, column: &str) -> bool {
        self.scales.iter().any(|s| s.column == column)
    }
}

impl FittedStage for FittedScaler {
    fn name(&self) -> &'static str {
        "scaler"
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(df.width());

        for scale in &self.scales {
            let floats = require_column(df, &scale.column)?
                .cast(&DataType::Float64)
                .with_context(|| format!("Column '{}' cannot be scaled", scale.column))?;
            let values: Vec<Option<f64>> = floats
                .f64()?
                .into_iter()
                .map(|v| v.map(|x| scale.apply(x)))
                .collect();
            columns.push(Column::new(scale.column.as_str().into(), values));
        }

        columns.extend(
            df.get_columns()
                .iter()
                .filter(|c| !self.is_scaled(c.name().as_str()))
                .cloned(),
        );

        DataFrame::new(columns).context("Failed to assemble scaled record set")
    }

    fn output_columns(&self, input_columns: &[String]) -> Vec<String> {
        self.scales
            .iter()
            .map(|s| s.column.clone())
            .chain(input_columns.iter().filter(|c| !self.is_scaled(c)).cloned())
            .collect()
    }
}
