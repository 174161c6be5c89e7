//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Spaceship - reshape, preprocess and evaluate Spaceship Titanic records
#[derive(Parser, Debug)]
#[command(name = "spaceship")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split Cabin, Name and PassengerId into typed sub-fields
    Reshape(ReshapeArgs),

    /// Fit the impute/encode/scale pipeline on training data and apply it
    Preprocess(PreprocessArgs),

    /// Report classification metrics and a confusion matrix for predictions
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
pub struct ReshapeArgs {
    /// Input file path (CSV or Parquet)
    pub input: PathBuf,

    /// Output file path. Defaults to the input path with a '_reshaped' suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only). 0 scans the whole file.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Overwrite existing output files without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

impl ReshapeArgs {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.input, "reshaped"))
    }
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Training file (CSV or Parquet). The pipeline is fitted on this data only.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Additional file transformed with the training fit (e.g. a test set)
    #[arg(short, long)]
    pub apply: Option<PathBuf>,

    /// Output path for the transformed training data.
    /// Defaults to the input path with a '_preprocessed' suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the fitted pipeline state to this JSON file
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// JSON file with the column-role configuration.
    /// Defaults to the built-in Spaceship Titanic layout.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only). 0 scans the whole file.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Overwrite existing output files without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Print per-stage timings while fitting and transforming
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl PreprocessArgs {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.input, "preprocessed"))
    }

    /// Output path for the `--apply` file, next to it with a '_preprocessed' suffix
    pub fn applied_output_path(&self) -> Option<PathBuf> {
        self.apply
            .as_ref()
            .map(|apply| derive_output_path(apply, "preprocessed"))
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// File holding ground truth and predicted labels (CSV or Parquet)
    pub input: PathBuf,

    /// Name shown in the report and on the confusion matrix
    #[arg(short, long, default_value = "model")]
    pub name: String,

    /// Column with ground-truth labels (0/1 or boolean)
    #[arg(long, default_value = "Transported")]
    pub truth: String,

    /// Column with predicted labels (0/1 or boolean)
    #[arg(long, default_value = "Prediction")]
    pub prediction: String,

    /// Write the metrics as JSON to this path
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only). 0 scans the whole file.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// `dir/name.ext` -> `dir/name_<suffix>.ext`
fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("parquet");
    parent.join(format!("{}_{}.{}", stem, suffix, extension))
}
