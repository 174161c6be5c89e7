//! Subcommand runners for the `spaceship` binary

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use super::args::{EvaluateArgs, PreprocessArgs, ReshapeArgs};
use super::prompts::confirm_overwrite;
use crate::pipeline::{
    is_reshaped, load_dataset, load_dataset_with_progress, require_column, reshape_records,
    save_dataset, save_fitted, FittedPreprocessor, PreprocessConfig, Preprocessor,
};
use crate::report::{
    export_evaluation, labels_from_column, report_matrix, ConfusionMatrix, PreprocessSummary,
};
use crate::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_info,
    print_step_header, print_step_time, print_success,
};

/// Reshape a raw passenger file and save it
pub fn run_reshape(args: &ReshapeArgs) -> Result<()> {
    let output_path = args.output_path();

    let (df, rows, cols, _) = load_dataset_with_progress(&args.input, args.infer_schema_length)?;
    let mut reshaped = reshape_records(&df)
        .with_context(|| format!("Failed to reshape {}", args.input.display()))?;
    print_success(&format!(
        "Reshaped {} rows: {} -> {} columns",
        rows,
        cols,
        reshaped.width()
    ));

    if !confirm_overwrite(&output_path, args.no_confirm)? {
        println!("Cancelled by user.");
        return Ok(());
    }
    save_dataset(&mut reshaped, &output_path)?;
    print_success(&format!("Saved to {}", output_path.display()));
    Ok(())
}

/// Reshape the frame unless it already carries the split sub-fields
fn ensure_reshaped(df: DataFrame) -> Result<DataFrame> {
    if is_reshaped(&df) {
        print_info("Compound fields already split");
        Ok(df)
    } else {
        let reshaped = reshape_records(&df)?;
        print_success("Split Cabin, Name and PassengerId");
        Ok(reshaped)
    }
}

/// Fit the preprocessing pipeline on the training file, transform it (and the
/// optional `--apply` file) and save the results
pub fn run_preprocess(args: &PreprocessArgs) -> Result<()> {
    let output_path = args.output_path();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &args.input,
        args.apply.as_deref(),
        &output_path,
        args.config.as_deref(),
    );

    let config = match &args.config {
        Some(path) => PreprocessConfig::from_json_file(path)?,
        None => PreprocessConfig::spaceship(),
    };

    // Step 1: Load and reshape
    print_step_header(1, "Load Training Data");
    let step_start = Instant::now();
    println!();
    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&args.input, args.infer_schema_length)?;
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    let df = ensure_reshaped(df)?;

    let mut summary = PreprocessSummary::new(rows, df.width());
    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_step_time(load_elapsed);

    // Step 2: Fit
    print_step_header(2, "Fit Pipeline");
    let step_start = Instant::now();
    let preprocessor = Preprocessor::for_frame(config, &df)?.with_verbose(args.verbose);
    summary.dropped = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|c| preprocessor.config().imputer.role_of(c).is_none())
        .collect();

    let spinner = (!args.verbose).then(|| create_spinner("Fitting impute → encode → scale..."));
    let (fitted, mut transformed) = preprocessor.fit_transform(&df)?;
    if let Some(spinner) = &spinner {
        finish_with_success(spinner, "Pipeline fitted");
    }

    summary.output_columns = transformed.width();
    summary.indicator_columns = fitted.encoder.width();
    summary.scaled_columns = fitted.scaler.scales.len();
    let fit_elapsed = step_start.elapsed();
    summary.set_fit_time(fit_elapsed);
    print_step_time(fit_elapsed);

    // Step 3: Apply to additional data with the same fit
    let applied = match (&args.apply, args.applied_output_path()) {
        (Some(apply), Some(apply_output)) => {
            print_step_header(3, "Apply Fitted Pipeline");
            let step_start = Instant::now();
            let applied = apply_fitted(&fitted, apply, args)?;
            summary.applied_rows = Some(applied.height());
            print_step_time(step_start.elapsed());
            Some((applied, apply_output))
        }
        _ => None,
    };

    // Step 4: Save
    print_step_header(4, "Save Results");
    let step_start = Instant::now();
    write_output(&mut transformed, &output_path, args.no_confirm)?;
    if let Some((mut applied, apply_output)) = applied {
        write_output(&mut applied, &apply_output, args.no_confirm)?;
    }
    if let Some(state_path) = &args.state {
        if confirm_overwrite(state_path, args.no_confirm)? {
            save_fitted(&fitted, state_path)?;
            print_success(&format!("Fitted state saved to {}", state_path.display()));
        }
    }
    let save_elapsed = step_start.elapsed();
    summary.set_save_time(save_elapsed);
    print_step_time(save_elapsed);

    summary.display();
    print_completion();

    Ok(())
}

fn apply_fitted(fitted: &FittedPreprocessor, path: &Path, args: &PreprocessArgs) -> Result<DataFrame> {
    let df = load_dataset(path, args.infer_schema_length)?;
    let df = ensure_reshaped(df)?;
    let spinner = create_spinner(&format!("Transforming {}...", path.display()));
    let transformed = fitted
        .clone()
        .with_verbose(args.verbose)
        .transform(&df)
        .with_context(|| format!("Failed to transform {}", path.display()))?;
    finish_with_success(
        &spinner,
        &format!("Transformed {} rows", transformed.height()),
    );
    Ok(transformed)
}

fn write_output(df: &mut DataFrame, path: &Path, no_confirm: bool) -> Result<()> {
    if !confirm_overwrite(path, no_confirm)? {
        print_info(&format!("Skipped {}", path.display()));
        return Ok(());
    }
    let spinner = create_spinner(&format!("Writing {}...", path.display()));
    save_dataset(df, path)?;
    finish_with_success(&spinner, &format!("Saved to {}", path.display()));
    Ok(())
}

/// Score predictions against ground truth and print the report
pub fn run_evaluate(args: &EvaluateArgs) -> Result<()> {
    let df = load_dataset(&args.input, args.infer_schema_length)?;
    let y_true = labels_from_column(require_column(&df, &args.truth)?)?;
    let y_pred = labels_from_column(require_column(&df, &args.prediction)?)?;

    let matrix = ConfusionMatrix::from_labels(&y_true, &y_pred)?;
    let metrics = report_matrix(&args.name, matrix);

    if let Some(report_path) = &args.report {
        export_evaluation(&args.name, matrix, metrics, report_path)?;
        println!();
        print_success(&format!("Report saved to {}", report_path.display()));
    }

    Ok(())
}
