//! Evaluation reporter: print metrics and draw a confusion matrix

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use super::metrics::{ClassificationMetrics, ConfusionMatrix};

/// Confusion matrix chart for one named model.
///
/// Each display owns a freshly built table, so nothing drawn for a previous
/// model leaks into the next one.
pub struct ConfusionMatrixDisplay {
    name: String,
    matrix: ConfusionMatrix,
}

impl ConfusionMatrixDisplay {
    pub fn new(name: &str, matrix: ConfusionMatrix) -> Self {
        Self {
            name: name.to_string(),
            matrix,
        }
    }

    pub fn from_predictions(name: &str, y_true: &[i32], y_pred: &[i32]) -> Result<Self> {
        Ok(Self::new(name, ConfusionMatrix::from_labels(y_true, y_pred)?))
    }

    /// Render the matrix as a table: rows are true labels, columns predicted labels.
    /// Cells are shaded by their share of all rows.
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("True \\ Predicted").add_attribute(Attribute::Bold),
            Cell::new("0").add_attribute(Attribute::Bold),
            Cell::new("1").add_attribute(Attribute::Bold),
        ]);

        let total = self.matrix.total().max(1) as f64;
        for (label, row) in self.matrix.as_grid().iter().enumerate() {
            let mut cells = vec![Cell::new(label).add_attribute(Attribute::Bold)];
            for (col, count) in row.iter().enumerate() {
                let share = *count as f64 / total;
                let color = match (label == col, share) {
                    (true, _) => Color::Green,
                    (false, s) if s > 0.25 => Color::Red,
                    (false, s) if s > 0.0 => Color::Yellow,
                    _ => Color::White,
                };
                cells.push(
                    Cell::new(format!("{} ({:.1}%)", count, share * 100.0))
                        .fg(color)
                        .set_alignment(CellAlignment::Right),
                );
            }
            table.add_row(cells);
        }

        table.to_string()
    }

    /// Print the titled chart to stdout
    pub fn plot(&self) {
        println!();
        println!(
            "    {} {}",
            style("▦").cyan(),
            style(format!("Confusion matrix: {}", self.name)).white().bold()
        );
        for line in self.render().lines() {
            println!("    {}", line);
        }
    }
}

/// Format the metric lines printed by [`evaluate`]
pub fn format_metrics(name: &str, metrics: &ClassificationMetrics) -> Vec<String> {
    std::iter::once(format!("Result for {}:", name))
        .chain(
            metrics
                .entries()
                .iter()
                .map(|(label, value)| format!("{}: {:?}", label, value)),
        )
        .collect()
}

/// Compute and print accuracy, precision, recall, F1 and Matthews correlation
/// for `y_pred` against `y_true`, then draw the confusion matrix tagged with
/// `name`.
///
/// Invalid label sequences are a caller error and abort before anything is
/// printed.
pub fn evaluate(name: &str, y_true: &[i32], y_pred: &[i32]) -> Result<ClassificationMetrics> {
    let matrix = ConfusionMatrix::from_labels(y_true, y_pred)?;
    Ok(report_matrix(name, matrix))
}

/// Print the metrics of an already tallied confusion matrix and draw it
pub fn report_matrix(name: &str, matrix: ConfusionMatrix) -> ClassificationMetrics {
    let metrics = ClassificationMetrics::from_confusion(&matrix);

    for line in format_metrics(name, &metrics) {
        println!("{}", line);
    }
    ConfusionMatrixDisplay::new(name, matrix).plot();

    metrics
}
