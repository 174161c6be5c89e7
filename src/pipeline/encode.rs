//! One-hot encoding of categorical columns
//!
//! Each encoded column becomes one `Float64` indicator column per category
//! seen at fit time, named `<column>_<category>`. Categories are sorted, so
//! the layout does not depend on row order. Values unseen at fit time (and
//! nulls) encode as all zeros. Columns that are not encoded pass through
//! after the indicators.

use std::collections::{BTreeSet, HashMap};

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::stage::{require_column, FittedStage};

#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    columns: Vec<String>,
}

/// Category vocabulary of one encoded column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    pub column: String,
    pub categories: Vec<String>,
}

impl CategoryVocabulary {
    /// Indicator column names for this vocabulary
    pub fn feature_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|category| format!("{}_{}", self.column, category))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedEncoder {
    pub vocabularies: Vec<CategoryVocabulary>,
}

impl OneHotEncoder {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Learn the sorted set of non-null categories per column. Numeric
    /// columns sort by value, everything else lexicographically.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedEncoder> {
        let vocabularies = self
            .columns
            .iter()
            .map(|name| {
                let column = require_column(df, name)?;
                let text = column
                    .cast(&DataType::String)
                    .with_context(|| format!("Column '{}' cannot be encoded as text", name))?;
                let distinct: BTreeSet<String> = text
                    .str()?
                    .into_iter()
                    .flatten()
                    .map(str::to_string)
                    .collect();
                let mut categories: Vec<String> = distinct.into_iter().collect();
                if column.dtype().is_primitive_numeric() {
                    categories.sort_by(|a, b| numeric_key(a).total_cmp(&numeric_key(b)));
                }
                Ok(CategoryVocabulary {
                    column: name.clone(),
                    categories,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FittedEncoder { vocabularies })
    }
}

/// Numeric categories are ordered by value, not by their text
fn numeric_key(category: &str) -> f64 {
    category.parse::<f64>().unwrap_or(f64::NAN)
}

impl FittedEncoder {
    fn is_encoded(&self, column: &str) -> bool {
        self.vocabularies.iter().any(|v| v.column == column)
    }

    /// Total number of indicator columns produced
    pub fn width(&self) -> usize {
        self.vocabularies.iter().map(|v| v.categories.len()).sum()
    }

    fn encode_column(&self, column: &Column, vocabulary: &CategoryVocabulary) -> Result<Vec<Column>> {
        let text = column.cast(&DataType::String)?;
        let ca = text.str()?;

        let index: HashMap<&str, usize> = vocabulary
            .categories
            .iter()
            .enumerate()
            .map(|(i, category)| (category.as_str(), i))
            .collect();

        let mut indicators = vec![vec![0.0f64; ca.len()]; vocabulary.categories.len()];
        for (row, value) in ca.into_iter().enumerate() {
            if let Some(&slot) = value.and_then(|v| index.get(v)) {
                indicators[slot][row] = 1.0;
            }
        }

        Ok(vocabulary
            .feature_names()
            .into_iter()
            .zip(indicators)
            .map(|(name, values)| Column::new(name.into(), values))
            .collect())
    }
}

impl FittedStage for FittedEncoder {
    fn name(&self) -> &'static str {
        "encoder"
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(df.width() + self.width());

        for vocabulary in &self.vocabularies {
            let column = require_column(df, &vocabulary.column)?;
            columns.extend(self.encode_column(column, vocabulary)?);
        }

        columns.extend(
            df.get_columns()
                .iter()
                .filter(|c| !self.is_encoded(c.name().as_str()))
                .cloned(),
        );

        DataFrame::new(columns).context("Failed to assemble encoded record set")
    }

    fn output_columns(&self, input_columns: &[String]) -> Vec<String> {
        self.vocabularies
            .iter()
            .flat_map(|v| v.feature_names())
            .chain(input_columns.iter().filter(|c| !self.is_encoded(c)).cloned())
            .collect()
    }
}
