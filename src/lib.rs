//! Spaceship: Feature Engineering Library
//!
//! Column reshaping, an impute/encode/scale preprocessing pipeline with a
//! strict fit/transform split, and binary classification reporting for the
//! Spaceship Titanic passenger table.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
