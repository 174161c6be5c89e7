//! The composed impute → encode → scale preprocessing pipeline
//!
//! A [`Preprocessor`] is built from an explicit [`PreprocessConfig`] and the
//! input column names, and checks the routing up front. Fitting consumes
//! training data and returns an immutable [`FittedPreprocessor`]; only the
//! fitted value can transform, so fit always precedes transform.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::encode::{FittedEncoder, OneHotEncoder};
use super::impute::{FittedImputer, Imputer};
use super::roles::PreprocessConfig;
use super::scale::{FittedScaler, StandardScaler};
use super::stage::{frame_columns, FittedStage};
use crate::utils::print_stage_time;

#[derive(Debug, Clone)]
pub struct Preprocessor {
    config: PreprocessConfig,
    imputer: Imputer,
    encoder: OneHotEncoder,
    scaler: StandardScaler,
    verbose: bool,
}

impl Preprocessor {
    /// Build a preprocessor after validating `config` against the input columns
    pub fn new<S: AsRef<str>>(config: PreprocessConfig, input_columns: &[S]) -> Result<Self> {
        config
            .validate(input_columns)
            .context("Invalid preprocessing configuration")?;

        Ok(Self {
            imputer: Imputer::new(config.imputer.clone()),
            encoder: OneHotEncoder::new(config.one_hot.clone()),
            scaler: StandardScaler::new(config.standard.clone()),
            config,
            verbose: false,
        })
    }

    /// Build a preprocessor for the columns of `df`
    pub fn for_frame(config: PreprocessConfig, df: &DataFrame) -> Result<Self> {
        Self::new(config, &frame_columns(df))
    }

    /// Print a timing line per stage while fitting and transforming
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Fit every stage in order, each on the previous stage's training output
    pub fn fit(&self, df: &DataFrame) -> Result<FittedPreprocessor> {
        self.fit_inner(df).map(|(fitted, _)| fitted)
    }

    /// Fit on `df` and return the transformed training data alongside the fit
    pub fn fit_transform(&self, df: &DataFrame) -> Result<(FittedPreprocessor, DataFrame)> {
        self.fit_inner(df)
    }

    fn fit_inner(&self, df: &DataFrame) -> Result<(FittedPreprocessor, DataFrame)> {
        let start = Instant::now();
        let imputer = self.imputer.fit(df).context("Failed to fit imputer")?;
        let imputed = imputer.transform(df)?;
        self.report(1, imputer.name(), start);

        let start = Instant::now();
        let encoder = self.encoder.fit(&imputed).context("Failed to fit encoder")?;
        let encoded = encoder.transform(&imputed)?;
        self.report(2, encoder.name(), start);

        let start = Instant::now();
        let scaler = self.scaler.fit(&encoded).context("Failed to fit scaler")?;
        let scaled = scaler.transform(&encoded)?;
        self.report(3, scaler.name(), start);

        let fitted = FittedPreprocessor {
            imputer,
            encoder,
            scaler,
            verbose: self.verbose,
        };
        Ok((fitted, scaled))
    }

    fn report(&self, step: usize, name: &str, start: Instant) {
        if self.verbose {
            print_stage_time(step, 3, name, start.elapsed());
        }
    }
}

/// Learned state of all three stages. Immutable; safe to share for
/// concurrent transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    pub imputer: FittedImputer,
    pub encoder: FittedEncoder,
    pub scaler: FittedScaler,
    #[serde(skip)]
    verbose: bool,
}

impl FittedPreprocessor {
    fn stages(&self) -> [&dyn FittedStage; 3] {
        [&self.imputer, &self.encoder, &self.scaler]
    }

    /// Apply the learned parameters to new data. Never refits.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut current = df.clone();
        for (i, stage) in self.stages().into_iter().enumerate() {
            let start = Instant::now();
            current = stage
                .transform(&current)
                .with_context(|| format!("Failed to apply {}", stage.name()))?;
            if self.verbose {
                print_stage_time(i + 1, 3, stage.name(), start.elapsed());
            }
        }
        Ok(current)
    }

    /// Final column layout produced by [`FittedPreprocessor::transform`]
    pub fn output_columns(&self) -> Vec<String> {
        self.stages()
            .into_iter()
            .fold(Vec::new(), |columns, stage| stage.output_columns(&columns))
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Save fitted state as pretty-printed JSON
pub fn save_fitted(fitted: &FittedPreprocessor, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(fitted).context("Failed to serialize fitted state")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write fitted state: {}", path.display()))?;
    Ok(())
}

/// Load fitted state written by [`save_fitted`]
pub fn load_fitted(path: &Path) -> Result<FittedPreprocessor> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fitted state: {}", path.display()))?;
    let fitted = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse fitted state: {}", path.display()))?;
    Ok(fitted)
}
