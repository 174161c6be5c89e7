//! Preprocessing summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of one preprocessing run
#[derive(Debug, Default)]
pub struct PreprocessSummary {
    pub rows: usize,
    pub input_columns: usize,
    pub output_columns: usize,
    pub dropped: Vec<String>,
    pub indicator_columns: usize,
    pub scaled_columns: usize,
    pub applied_rows: Option<usize>,
    load_time: Option<Duration>,
    fit_time: Option<Duration>,
    save_time: Option<Duration>,
}

impl PreprocessSummary {
    pub fn new(rows: usize, input_columns: usize) -> Self {
        Self {
            rows,
            input_columns,
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = Some(elapsed);
    }

    pub fn set_fit_time(&mut self, elapsed: Duration) {
        self.fit_time = Some(elapsed);
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = Some(elapsed);
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPROCESSING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("🧾 Training Rows"), Cell::new(self.rows)]);
        if let Some(applied) = self.applied_rows {
            table.add_row(vec![Cell::new("🧾 Applied Rows"), Cell::new(applied)]);
        }
        table.add_row(vec![
            Cell::new("📁 Input Columns"),
            Cell::new(self.input_columns),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (Unrouted)"),
            Cell::new(self.dropped.len()).fg(if self.dropped.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("🔢 One-hot Indicators"),
            Cell::new(self.indicator_columns),
        ]);
        table.add_row(vec![
            Cell::new("📏 Standardized Columns"),
            Cell::new(self.scaled_columns),
        ]);
        table.add_row(vec![
            Cell::new("✅ Output Columns"),
            Cell::new(self.output_columns)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        for (label, elapsed) in [
            ("⏱️  Load", self.load_time),
            ("⏱️  Fit + Transform", self.fit_time),
            ("⏱️  Save", self.save_time),
        ] {
            if let Some(elapsed) = elapsed {
                table.add_row(vec![
                    Cell::new(label),
                    Cell::new(format!("{:.2}s", elapsed.as_secs_f64())),
                ]);
            }
        }

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.dropped.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Dropped by imputer").yellow(),
                style(format!("({})", self.dropped.len())).dim()
            );
            for column in &self.dropped {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
