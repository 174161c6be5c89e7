//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Six raw passenger rows in the Kaggle column layout.
///
/// Row 6 is sparse: no home planet, cabin, age, VIP flag, food court spend
/// or name. `HomePlanet` is Europa x3 / Earth x2, `CabinDeck` ties A/F at two
/// each.
pub fn create_passenger_dataframe() -> DataFrame {
    df! {
        "PassengerId" => ["0001_01", "0002_01", "0003_01", "0003_02", "0004_01", "0005_01"],
        "HomePlanet" => [Some("Europa"), Some("Earth"), Some("Europa"), Some("Europa"), Some("Earth"), None],
        "CryoSleep" => [Some(false), Some(false), Some(false), Some(false), Some(false), Some(true)],
        "Cabin" => [Some("B/0/P"), Some("F/0/S"), Some("A/0/S"), Some("A/0/S"), Some("F/1/S"), None],
        "Destination" => ["TRAPPIST-1e", "TRAPPIST-1e", "TRAPPIST-1e", "TRAPPIST-1e", "TRAPPIST-1e", "PSO J318.5-22"],
        "Age" => [Some(39.0f64), Some(24.0), Some(58.0), Some(33.0), Some(16.0), None],
        "VIP" => [Some(false), Some(false), Some(true), Some(false), Some(false), None],
        "RoomService" => [0.0f64, 109.0, 43.0, 0.0, 303.0, 0.0],
        "FoodCourt" => [Some(0.0f64), Some(9.0), Some(3576.0), Some(1283.0), Some(70.0), None],
        "ShoppingMall" => [0.0f64, 25.0, 0.0, 371.0, 151.0, 0.0],
        "Spa" => [0.0f64, 549.0, 6715.0, 3329.0, 565.0, 0.0],
        "VRDeck" => [0.0f64, 44.0, 49.0, 193.0, 2.0, 0.0],
        "Name" => [Some("Maham Ofracculy"), Some("Juanna Vines"), Some("Altark Susent"), Some("Solam Susent"), Some("Willy Santantines"), None],
        "Transported" => [false, true, false, false, true, true],
    }
    .unwrap()
}

/// Two unseen passengers without the label column; one has an unknown deck.
pub fn create_unlabelled_dataframe() -> DataFrame {
    df! {
        "PassengerId" => ["0013_01", "0018_01"],
        "HomePlanet" => [Some("Earth"), Some("Mars")],
        "CryoSleep" => [Some(true), None],
        "Cabin" => [Some("G/3/S"), Some("B/1/P")],
        "Destination" => ["TRAPPIST-1e", "55 Cancri e"],
        "Age" => [Some(27.0f64), None],
        "VIP" => [Some(false), Some(false)],
        "RoomService" => [0.0f64, 10.0],
        "FoodCourt" => [Some(0.0f64), Some(9.0)],
        "ShoppingMall" => [0.0f64, 0.0],
        "Spa" => [0.0f64, 2823.0],
        "VRDeck" => [0.0f64, 0.0],
        "Name" => [Some("Nelly Carsoning"), Some("Lerome Peckers")],
    }
    .unwrap()
}

/// Column layout produced by the built-in configuration on the passenger fixture
pub fn expected_output_columns() -> Vec<&'static str> {
    vec![
        "GroupId",
        "CabinNum",
        "Age",
        "RoomService",
        "FoodCourt",
        "ShoppingMall",
        "Spa",
        "VRDeck",
        "HomePlanet_Earth",
        "HomePlanet_Europa",
        "CabinDeck_A",
        "CabinDeck_B",
        "CabinDeck_F",
        "CabinSide_P",
        "CabinSide_S",
        "Destination_PSO J318.5-22",
        "Destination_TRAPPIST-1e",
        "IdInGroup",
        "CryoSleep",
        "VIP",
    ]
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Column names of a frame as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols = column_names(df);
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols = column_names(df);
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Read a Float64 column into a vector, panicking on nulls
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.expect("unexpected null"))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
