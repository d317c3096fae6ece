//! Integration tests for the CSV loader and the dataset cache.

#[path = "../common/mod.rs"]
mod common;

use common::{fixture_path, sample};
use std::fs;
use supplyboard::data::{self, CategoryColumn, DataError, Dataset};

#[test]
fn test_load_sample_fixture() {
    let dataset = sample();

    assert_eq!(dataset.len(), 8);
    assert_eq!(dataset.source(), Some(fixture_path().as_path()));

    let first = &dataset.records()[0];
    assert_eq!(first.sku.as_deref(), Some("SKU0"));
    assert_eq!(first.product_type.as_deref(), Some("haircare"));
    assert_eq!(first.location.as_deref(), Some("Mumbai"));
    assert_eq!(first.revenue_generated, Some(1000.0));
    assert_eq!(first.products_sold, Some(100));
    assert_eq!(first.manufacturing_lead_time, Some(29));
    assert_eq!(first.inspection_results.as_deref(), Some("Pass"));
}

#[test]
fn test_load_is_cached() {
    let a = data::load(fixture_path()).unwrap();
    let b = data::load(fixture_path()).unwrap();
    assert!(std::ptr::eq(a, b));
    assert!(data::cached().is_some_and(|c| std::ptr::eq(c, a)));
}

#[test]
fn test_load_with_other_path_returns_cached_dataset() {
    let first = sample();
    let again = data::load("does/not/matter.csv").unwrap();
    assert!(std::ptr::eq(first, again));
}

#[test]
fn test_distinct_values_in_first_appearance_order() {
    let dataset = sample();
    assert_eq!(dataset.product_types(), vec!["haircare", "skincare", "cosmetics"]);
    assert_eq!(
        dataset.locations(),
        vec!["Mumbai", "Kolkata", "Delhi", "Bangalore"]
    );
    assert_eq!(
        dataset.distinct(CategoryColumn::ShippingCarriers),
        vec!["Carrier A", "Carrier B", "Carrier C"]
    );
}

#[test]
fn test_missing_file() {
    let result = Dataset::from_path("/nonexistent/supply_chain_data.csv");
    assert!(matches!(result, Err(DataError::NotFound(_))));
}

#[test]
fn test_missing_required_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(&path, "Product type,SKU,Price\nhaircare,SKU0,1.0\n").unwrap();

    let result = Dataset::from_path(&path);
    assert!(matches!(result, Err(DataError::MissingColumn(_))));
}

#[test]
fn test_invalid_numeric_value_reports_line() {
    let original = fs::read_to_string(fixture_path()).unwrap();
    let broken = original.replacen(",1000.0,", ",lots,", 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, broken).unwrap();

    match Dataset::from_path(&path) {
        Err(DataError::InvalidValue {
            line,
            column,
            value,
        }) => {
            assert_eq!(line, 2);
            assert_eq!(column, "Revenue generated");
            assert_eq!(value, "lots");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn test_empty_cells_become_nulls() {
    let original = fs::read_to_string(fixture_path()).unwrap();
    let mut lines: Vec<String> = original.lines().map(str::to_string).collect();
    // Blank out Location and Revenue generated of SKU1.
    lines[2] = lines[2]
        .replacen(",Kolkata,", ",,", 1)
        .replacen(",3000.0,", ",,", 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gaps.csv");
    fs::write(&path, lines.join("\n")).unwrap();

    let dataset = Dataset::from_path(&path).unwrap();
    let record = &dataset.records()[1];
    assert_eq!(record.sku.as_deref(), Some("SKU1"));
    assert_eq!(record.location, None);
    assert_eq!(record.revenue_generated, None);
    assert_eq!(
        dataset.locations(),
        vec!["Mumbai", "Delhi", "Bangalore", "Kolkata"]
    );
}
