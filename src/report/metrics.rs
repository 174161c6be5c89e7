//! Binary classification metrics

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::PreprocessError;

/// Counts of a binary confusion matrix (label 1 is the positive class)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_negative: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    pub true_positive: u64,
}

impl ConfusionMatrix {
    /// Tally ground truth against predictions.
    ///
    /// Both sequences must be non-empty, of equal length, and contain only 0
    /// and 1.
    pub fn from_labels(y_true: &[i32], y_pred: &[i32]) -> Result<Self> {
        if y_true.is_empty() {
            return Err(PreprocessError::invalid_labels("label sequences are empty").into());
        }
        if y_true.len() != y_pred.len() {
            return Err(PreprocessError::invalid_labels(format!(
                "length mismatch: {} true labels vs {} predictions",
                y_true.len(),
                y_pred.len()
            ))
            .into());
        }

        let mut matrix = ConfusionMatrix::default();
        for (row, (&truth, &pred)) in y_true.iter().zip(y_pred).enumerate() {
            match (truth, pred) {
                (0, 0) => matrix.true_negative += 1,
                (0, 1) => matrix.false_positive += 1,
                (1, 0) => matrix.false_negative += 1,
                (1, 1) => matrix.true_positive += 1,
                _ => {
                    return Err(PreprocessError::invalid_labels(format!(
                        "row {} has labels ({}, {}); expected values in {{0, 1}}",
                        row, truth, pred
                    ))
                    .into())
                }
            }
        }

        Ok(matrix)
    }

    pub fn total(&self) -> u64 {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }

    /// Counts as rows of true label, columns of predicted label
    pub fn as_grid(&self) -> [[u64; 2]; 2] {
        [
            [self.true_negative, self.false_positive],
            [self.false_negative, self.true_positive],
        ]
    }
}

/// The five reported metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub matthews: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl ClassificationMetrics {
    /// Closed-form metrics from a confusion matrix. A zero denominator yields 0.0.
    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        let tp = cm.true_positive as f64;
        let tn = cm.true_negative as f64;
        let fp = cm.false_positive as f64;
        let fn_ = cm.false_negative as f64;

        let accuracy = ratio(tp + tn, cm.total() as f64);
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = ratio(2.0 * tp, 2.0 * tp + fp + fn_);
        let matthews = ratio(
            tp * tn - fp * fn_,
            ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt(),
        );

        Self {
            accuracy,
            precision,
            recall,
            f1,
            matthews,
        }
    }

    pub fn from_labels(y_true: &[i32], y_pred: &[i32]) -> Result<Self> {
        ConfusionMatrix::from_labels(y_true, y_pred).map(|cm| Self::from_confusion(&cm))
    }

    /// Metric names and values in reporting order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("accuracy", self.accuracy),
            ("precision", self.precision),
            ("recall", self.recall),
            ("f1", self.f1),
            ("matthews", self.matthews),
        ]
    }
}

/// Read a 0/1 label column.
///
/// Booleans map to 0/1 and integers are read as-is. Float labels must be
/// exactly 0.0 or 1.0, so probabilities are rejected instead of truncated.
/// Nulls and values that cannot be read as integers are rejected.
pub fn labels_from_column(column: &Column) -> Result<Vec<i32>> {
    let name = column.name();
    let label_error = |row: usize, problem: &str| {
        anyhow::Error::from(PreprocessError::invalid_labels(format!(
            "column '{}' has a {} at row {}",
            name, problem, row
        )))
    };

    if column.dtype().is_float() {
        let floats = column.cast(&DataType::Float64)?;
        return floats
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(x) if x == 0.0 => Ok(0),
                Some(x) if x == 1.0 => Ok(1),
                Some(_) => Err(label_error(row, "non-binary label")),
                None => Err(label_error(row, "missing label")),
            })
            .collect();
    }

    let missing = column.is_null();
    let ints = column.cast(&DataType::Int32)?;
    ints.i32()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| match v {
            Some(label) => Ok(label),
            None if missing.get(row) == Some(true) => Err(label_error(row, "missing label")),
            None => Err(label_error(row, "non-binary label")),
        })
        .collect()
}
