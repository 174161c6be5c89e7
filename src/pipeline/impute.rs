//! Missing value imputation routed by column role
//!
//! Identifier columns pass through, categorical columns are filled with their
//! most frequent training value and numeric columns with their training
//! median. Columns outside the configured roles are dropped, which keeps the
//! label column out of the feature matrix.

use std::cmp::Ordering;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::PreprocessError;
use super::roles::ColumnRoles;
use super::stage::{require_column, FittedStage};

/// A learned most-frequent value, typed after the column it was fitted on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FillValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

/// Unfitted imputer: just the role routing
#[derive(Debug, Clone)]
pub struct Imputer {
    roles: ColumnRoles,
}

/// Imputer with learned fill values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedImputer {
    pub passthrough: Vec<String>,
    pub most_frequent: Vec<(String, FillValue)>,
    pub median: Vec<(String, f64)>,
}

impl Imputer {
    pub fn new(roles: ColumnRoles) -> Self {
        Self { roles }
    }

    /// Learn the most frequent value per categorical column and the median per
    /// numeric column. Nulls are ignored while fitting.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedImputer> {
        for column in &self.roles.identifier {
            require_column(df, column)?;
        }

        let most_frequent = self
            .roles
            .categorical
            .iter()
            .map(|name| {
                let column = require_column(df, name)?;
                let fill = most_frequent_value(column)?;
                Ok((name.clone(), fill))
            })
            .collect::<Result<Vec<_>>>()?;

        let median = self
            .roles
            .numeric
            .iter()
            .map(|name| {
                let column = require_column(df, name)?;
                let value = median_value(column)?;
                Ok((name.clone(), value))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FittedImputer {
            passthrough: self.roles.identifier.clone(),
            most_frequent,
            median,
        })
    }
}

impl FittedStage for FittedImputer {
    fn name(&self) -> &'static str {
        "imputer"
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(
            self.passthrough.len() + self.most_frequent.len() + self.median.len(),
        );

        for name in &self.passthrough {
            columns.push(require_column(df, name)?.clone());
        }
        for (name, fill) in &self.most_frequent {
            columns.push(fill_categorical(require_column(df, name)?, fill)?);
        }
        for (name, median) in &self.median {
            columns.push(fill_numeric(require_column(df, name)?, *median)?);
        }

        DataFrame::new(columns).context("Failed to assemble imputed record set")
    }

    fn output_columns(&self, _input_columns: &[String]) -> Vec<String> {
        self.passthrough
            .iter()
            .cloned()
            .chain(self.most_frequent.iter().map(|(name, _)| name.clone()))
            .chain(self.median.iter().map(|(name, _)| name.clone()))
            .collect()
    }
}

/// Most frequent value of a run-sorted sequence; ties go to the smallest value
fn mode_of_sorted<T: PartialEq>(sorted: Vec<T>) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    let mut iter = sorted.into_iter().peekable();

    while let Some(value) = iter.next() {
        let mut count = 1;
        while iter.peek() == Some(&value) {
            iter.next();
            count += 1;
        }
        if best.as_ref().map_or(true, |(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}

fn most_frequent_value(column: &Column) -> Result<FillValue> {
    let name = column.name().to_string();
    let dtype = column.dtype().clone();

    let fill = match dtype {
        DataType::String => {
            let mut values: Vec<&str> = column.str()?.into_iter().flatten().collect();
            values.sort_unstable();
            mode_of_sorted(values).map(|v| FillValue::Text(v.to_string()))
        }
        DataType::Boolean => {
            let mut values: Vec<bool> = column.bool()?.into_iter().flatten().collect();
            values.sort_unstable();
            mode_of_sorted(values).map(FillValue::Boolean)
        }
        ref dt if dt.is_integer() => {
            let ints = column.cast(&DataType::Int64)?;
            let mut values: Vec<i64> = ints.i64()?.into_iter().flatten().collect();
            values.sort_unstable();
            mode_of_sorted(values).map(FillValue::Integer)
        }
        ref dt if dt.is_float() => {
            let floats = column.cast(&DataType::Float64)?;
            let mut values: Vec<f64> = floats
                .f64()?
                .into_iter()
                .flatten()
                .filter(|v| !v.is_nan())
                .collect();
            values.sort_by(|a, b| a.total_cmp(b));
            mode_of_sorted(values).map(FillValue::Float)
        }
        DataType::Null => None,
        other => {
            return Err(PreprocessError::UnsupportedType {
                column: name,
                dtype: other.to_string(),
                stage: "most-frequent imputation",
            }
            .into())
        }
    };

    fill.ok_or_else(|| PreprocessError::NoObservedValues { column: name }.into())
}

fn median_value(column: &Column) -> Result<f64> {
    let name = column.name().to_string();
    let dtype = column.dtype();
    if !(dtype.is_primitive_numeric() || matches!(dtype, DataType::Boolean | DataType::Null)) {
        return Err(PreprocessError::UnsupportedType {
            column: name,
            dtype: dtype.to_string(),
            stage: "median imputation",
        }
        .into());
    }

    let floats = column.cast(&DataType::Float64)?;
    let mut values: Vec<f64> = floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();

    if values.is_empty() {
        return Err(PreprocessError::NoObservedValues { column: name }.into());
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };

    Ok(median)
}

fn fill_categorical(column: &Column, fill: &FillValue) -> Result<Column> {
    let name = column.name().clone();

    let filled = match fill {
        FillValue::Text(value) => {
            let text = column.cast(&DataType::String)?;
            let values: Vec<&str> = text
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or(value.as_str()))
                .collect();
            Column::new(name, values)
        }
        FillValue::Boolean(value) => {
            let flags = column.cast(&DataType::Boolean)?;
            let values: Vec<bool> = flags
                .bool()?
                .into_iter()
                .map(|v| v.unwrap_or(*value))
                .collect();
            Column::new(name, values)
        }
        FillValue::Integer(value) => {
            let target = if column.dtype().is_integer() {
                column.dtype().clone()
            } else {
                DataType::Int64
            };
            let ints = column.cast(&DataType::Int64)?;
            let values: Vec<i64> = ints
                .i64()?
                .into_iter()
                .map(|v| v.unwrap_or(*value))
                .collect();
            Column::new(name, values).cast(&target)?
        }
        FillValue::Float(value) => {
            let floats = column.cast(&DataType::Float64)?;
            let values: Vec<f64> = floats
                .f64()?
                .into_iter()
                .map(|v| match v {
                    Some(x) if !x.is_nan() => x,
                    _ => *value,
                })
                .collect();
            Column::new(name, values)
        }
    };

    Ok(filled)
}

fn fill_numeric(column: &Column, median: f64) -> Result<Column> {
    let floats = column.cast(&DataType::Float64)?;
    let values: Vec<f64> = floats
        .f64()?
        .into_iter()
        .map(|v| match v {
            Some(x) if !x.is_nan() => x,
            _ => median,
        })
        .collect();
    Ok(Column::new(column.name().clone(), values))
}
