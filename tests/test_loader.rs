//! Unit tests for dataset loading and saving

use polars::prelude::*;
use spaceship::pipeline::{
    get_column_names, load_dataset, load_dataset_with_progress, save_dataset, FileFormat,
};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    writeln!(file, "4,5,6").unwrap();
    drop(file);

    let (df, rows, cols, mem_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 2, "Should have 2 data rows");
    assert_eq!(cols, 3, "Should have 3 columns");
    assert_eq!(df.get_column_names(), &["a", "b", "c"]);
    assert!(mem_mb >= 0.0, "Memory estimate should be non-negative");
}

#[test]
fn test_load_parquet_file() {
    let mut df = common::create_passenger_dataframe();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let (loaded, rows, cols, _) = load_dataset_with_progress(&parquet_path, 100).unwrap();

    assert_eq!(rows, 6);
    assert_eq!(cols, 14);
    assert!(loaded.equals_missing(&df), "Parquet round trip should be lossless");
}

#[test]
fn test_get_column_names_csv() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "PassengerId,Cabin,Name").unwrap();
    writeln!(file, "0001_01,B/0/P,Maham Ofracculy").unwrap();
    drop(file);

    let columns = get_column_names(&csv_path).unwrap();

    assert_eq!(columns, vec!["PassengerId", "Cabin", "Name"]);
}

#[test]
fn test_get_column_names_parquet() {
    let mut df = df! {
        "GroupId" => [1i32],
        "Age" => [2.0f64],
        "Transported" => [true],
    }
    .unwrap();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let columns = get_column_names(&parquet_path).unwrap();

    assert_eq!(columns, vec!["GroupId", "Age", "Transported"]);
}

#[test]
fn test_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let bad_path = temp_dir.path().join("test.xlsx");
    std::fs::File::create(&bad_path).unwrap();

    let result = load_dataset(&bad_path, 100);

    assert!(result.is_err(), "Unsupported format should return error");
    let err_msg = result.unwrap_err().to_string();
    assert!(
        err_msg.contains("Unsupported"),
        "Error message should mention unsupported format: {}",
        err_msg
    );
}

#[test]
fn test_format_from_extension_is_case_insensitive() {
    assert_eq!(
        FileFormat::from_path(Path::new("train.CSV")).unwrap(),
        FileFormat::Csv
    );
    assert_eq!(
        FileFormat::from_path(Path::new("train.parquet")).unwrap(),
        FileFormat::Parquet
    );
    assert!(FileFormat::from_path(Path::new("train")).is_err());
}

#[test]
fn test_nonexistent_file() {
    let path = Path::new("/nonexistent/path/to/file.csv");

    let result = load_dataset_with_progress(path, 100);

    assert!(result.is_err(), "Nonexistent file should return error");
}

#[test]
fn test_csv_with_missing_values() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("missing.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "HomePlanet,Age,Cabin").unwrap();
    writeln!(file, "Europa,,B/0/P").unwrap(); // Age is missing
    writeln!(file, ",24,").unwrap(); // HomePlanet and Cabin are missing
    writeln!(file, "Earth,58,A/0/S").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();

    let null_counts: Vec<usize> = df.get_columns().iter().map(|c| c.null_count()).collect();
    assert_eq!(null_counts, vec![1, 1, 1], "Each column should have 1 null");
}

#[test]
fn test_full_scan_schema_inference() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("inference.csv");

    // Integers first, a float only at the end
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "Spa").unwrap();
    for i in 0..50 {
        writeln!(file, "{}", i).unwrap();
    }
    writeln!(file, "0.5").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 0).unwrap();

    assert_eq!(df.height(), 51);
    assert_eq!(df.column("Spa").unwrap().dtype(), &DataType::Float64);
}

#[test]
fn test_save_csv_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("saved.csv");
    let mut df = df! {
        "GroupId" => [1i64, 2, 3],
        "CabinSide" => [Some("P"), None, Some("S")],
    }
    .unwrap();

    save_dataset(&mut df, &csv_path).unwrap();
    let loaded = load_dataset(&csv_path, 100).unwrap();

    assert!(loaded.equals_missing(&df));
}

#[test]
fn test_save_rejects_unknown_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("saved.json");
    let mut df = df! { "a" => [1i32] }.unwrap();

    assert!(save_dataset(&mut df, &path).is_err());
    assert!(!path.exists(), "No file should be created for a rejected format");
}
