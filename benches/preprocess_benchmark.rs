//! Benchmark reshaping, pipeline fitting and transforming on synthetic passengers
//!
//! Run with: cargo bench --bench preprocess_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use spaceship::pipeline::{reshape_records, PreprocessConfig, Preprocessor};

const PLANETS: [&str; 3] = ["Earth", "Europa", "Mars"];
const DECKS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "T"];
const DESTINATIONS: [&str; 3] = ["TRAPPIST-1e", "55 Cancri e", "PSO J318.5-22"];

/// Raw passenger records with roughly 2% missing values per nullable field
fn generate_passengers(n_rows: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let maybe = |rng: &mut StdRng| rng.gen::<f64>() > 0.02;

    let passenger_id: Vec<String> = (0..n_rows)
        .map(|i| format!("{:04}_{:02}", i / 2 + 1, i % 2 + 1))
        .collect();
    let home_planet: Vec<Option<&str>> = (0..n_rows)
        .map(|_| maybe(&mut rng).then(|| PLANETS[rng.gen_range(0..PLANETS.len())]))
        .collect();
    let cryo_sleep: Vec<Option<bool>> = (0..n_rows)
        .map(|_| maybe(&mut rng).then(|| rng.gen::<bool>()))
        .collect();
    let cabin: Vec<Option<String>> = (0..n_rows)
        .map(|_| {
            maybe(&mut rng).then(|| {
                format!(
                    "{}/{}/{}",
                    DECKS[rng.gen_range(0..DECKS.len())],
                    rng.gen_range(0..2000),
                    if rng.gen::<bool>() { "P" } else { "S" }
                )
            })
        })
        .collect();
    let destination: Vec<Option<&str>> = (0..n_rows)
        .map(|_| maybe(&mut rng).then(|| DESTINATIONS[rng.gen_range(0..DESTINATIONS.len())]))
        .collect();
    let age: Vec<Option<f64>> = (0..n_rows)
        .map(|_| maybe(&mut rng).then(|| rng.gen_range(0.0..80.0f64).floor()))
        .collect();
    let vip: Vec<Option<bool>> = (0..n_rows)
        .map(|_| maybe(&mut rng).then(|| rng.gen::<f64>() > 0.97))
        .collect();
    let name: Vec<Option<String>> = (0..n_rows)
        .map(|i| maybe(&mut rng).then(|| format!("Passenger{} Family{}", i, i % 97)))
        .collect();

    let mut columns = vec![
        Column::new("PassengerId".into(), passenger_id),
        Column::new("HomePlanet".into(), home_planet),
        Column::new("CryoSleep".into(), cryo_sleep),
        Column::new("Cabin".into(), cabin),
        Column::new("Destination".into(), destination),
        Column::new("Age".into(), age),
        Column::new("VIP".into(), vip),
    ];
    for spend in ["RoomService", "FoodCourt", "ShoppingMall", "Spa", "VRDeck"] {
        let values: Vec<Option<f64>> = (0..n_rows)
            .map(|_| {
                maybe(&mut rng).then(|| {
                    // Mostly zero, occasionally large
                    let v = rng.gen::<f64>();
                    if v < 0.6 {
                        0.0
                    } else {
                        (v * v * v * 5000.0).round()
                    }
                })
            })
            .collect();
        columns.push(Column::new(spend.into(), values));
    }
    columns.push(Column::new("Name".into(), name));

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

fn benchmark_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");

    for n_rows in [1_000, 10_000, 50_000] {
        let df = generate_passengers(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| reshape_records(black_box(df)).expect("reshape failed"));
        });
    }

    group.finish();
}

fn benchmark_fit_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_transform");

    for n_rows in [1_000, 10_000, 50_000] {
        let df = reshape_records(&generate_passengers(n_rows, 42)).expect("reshape failed");
        let preprocessor = Preprocessor::for_frame(PreprocessConfig::spaceship(), &df)
            .expect("invalid configuration");
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| preprocessor.fit_transform(black_box(df)).expect("fit failed"));
        });
    }

    group.finish();
}

/// Transform alone, reusing one fit on unseen rows
fn benchmark_transform_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_only");

    let train = reshape_records(&generate_passengers(10_000, 42)).expect("reshape failed");
    let fitted = Preprocessor::for_frame(PreprocessConfig::spaceship(), &train)
        .expect("invalid configuration")
        .fit(&train)
        .expect("fit failed");

    for n_rows in [1_000, 10_000] {
        let test = reshape_records(&generate_passengers(n_rows, 7)).expect("reshape failed");
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &test, |b, test| {
            b.iter(|| fitted.transform(black_box(test)).expect("transform failed"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reshape,
    benchmark_fit_transform,
    benchmark_transform_only,
);
criterion_main!(benches);
