//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use supplyboard::data::{self, Dataset, Record};

/// Path of the eight-row sample CSV.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("supply_chain_sample.csv")
}

/// The sample dataset through the process-wide cache.
pub fn sample() -> &'static Dataset {
    data::load(fixture_path()).expect("sample fixture loads")
}

/// A record with only the filter dimensions set.
pub fn record(product_type: &str, location: &str) -> Record {
    Record {
        product_type: Some(product_type.to_string()),
        location: Some(location.to_string()),
        ..Default::default()
    }
}

/// Assert two floats are within 1e-9.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
