//! JSON export of evaluation results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::metrics::{ClassificationMetrics, ConfusionMatrix};

/// Metadata about the evaluation run
#[derive(Serialize)]
pub struct EvaluationMetadata {
    /// Timestamp of the evaluation (ISO 8601 format)
    pub timestamp: String,
    /// Spaceship version
    pub spaceship_version: String,
    /// Display name of the evaluated model
    pub name: String,
    /// Number of labelled rows
    pub rows: u64,
}

#[derive(Serialize)]
pub struct EvaluationExport {
    pub metadata: EvaluationMetadata,
    pub confusion_matrix: ConfusionMatrix,
    pub metrics: ClassificationMetrics,
}

impl EvaluationExport {
    pub fn new(name: &str, matrix: ConfusionMatrix, metrics: ClassificationMetrics) -> Self {
        Self {
            metadata: EvaluationMetadata {
                timestamp: Utc::now().to_rfc3339(),
                spaceship_version: env!("CARGO_PKG_VERSION").to_string(),
                name: name.to_string(),
                rows: matrix.total(),
            },
            confusion_matrix: matrix,
            metrics,
        }
    }
}

/// Write an evaluation report as pretty-printed JSON
pub fn export_evaluation(
    name: &str,
    matrix: ConfusionMatrix,
    metrics: ClassificationMetrics,
    output_path: &Path,
) -> Result<()> {
    let export = EvaluationExport::new(name, matrix, metrics);
    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize evaluation report")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write evaluation report: {}", output_path.display()))?;
    Ok(())
}
