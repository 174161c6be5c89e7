//! Spaceship: feature engineering CLI for the Spaceship Titanic task
//!
//! Reshapes passenger records, fits and applies the preprocessing pipeline,
//! and reports classification metrics for model predictions.

use anyhow::Result;
use clap::Parser;

use spaceship::cli::{run_evaluate, run_preprocess, run_reshape, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Reshape(args) => run_reshape(args),
        Commands::Preprocess(args) => run_preprocess(args),
        Commands::Evaluate(args) => run_evaluate(args),
    }
}
