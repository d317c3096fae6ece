//! Integration tests for the Supplier & Location page queries.

#[path = "../common/mod.rs"]
mod common;

use common::{assert_close, sample};
use supplyboard::data::{Dataset, Record};
use supplyboard::filter::{filter, FilterSelection, FilteredView};
use supplyboard::query::{location_summary, Cell, QueryId};

#[test]
fn test_revenue_by_supplier() {
    let view = FilteredView::full(sample());
    let result = QueryId::RevenueBySupplier.run(&view);
    let series = result.as_series().unwrap();

    assert_eq!(series.labels, vec!["Supplier 1", "Supplier 2", "Supplier 3"]);
    assert_eq!(series.values, vec![4_500.0, 9_500.0, 11_000.0]);
}

#[test]
fn test_production_by_location() {
    let view = FilteredView::full(sample());
    let result = QueryId::ProductionByLocation.run(&view);
    let series = result.as_series().unwrap();

    assert_eq!(series.labels, vec!["Mumbai", "Kolkata", "Delhi", "Bangalore"]);
    assert_eq!(series.values, vec![800.0, 1_000.0, 1_200.0, 1_400.0]);
}

#[test]
fn test_manufacturing_costs_by_supplier() {
    let view = FilteredView::full(sample());
    let result = QueryId::ManufacturingCostsBySupplier.run(&view);
    let groups = result.as_distributions().unwrap();

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].label, "Supplier 1");
    assert_eq!(groups[0].sample, vec![40.0, 80.0, 70.0]);
    assert_close(groups[0].summary.as_ref().unwrap().median, 70.0);
    assert_eq!(groups[2].sample, vec![20.0, 50.0]);
}

#[test]
fn test_location_summary_rows() {
    let view = FilteredView::full(sample());
    let table = location_summary(&view);

    assert_eq!(table.columns[0], "Location");
    assert_eq!(table.len(), 4);

    let number = |row: usize, column: &str| table.cell(row, column).and_then(Cell::as_f64).unwrap();
    assert_eq!(table.cell(0, "Location").and_then(Cell::as_str), Some("Mumbai"));
    assert_close(number(0, "Revenue generated"), 5_000.0);
    assert_close(number(0, "Number of products sold"), 600.0);
    assert_close(number(0, "Production volumes"), 800.0);
    assert_close(number(0, "Manufacturing costs"), 35.0);
    assert_close(number(0, "Lead times"), 12.5);

    assert_eq!(table.cell(3, "Location").and_then(Cell::as_str), Some("Bangalore"));
    assert_close(number(3, "Lead times"), 11.5);
}

#[test]
fn test_location_summary_rounds_to_two_decimals() {
    let rec = |cost: f64| Record {
        location: Some("Delhi".into()),
        manufacturing_costs: Some(cost),
        ..Default::default()
    };
    let dataset = Dataset::new(vec![rec(1.0), rec(2.0), rec(2.0)]);
    let table = location_summary(&FilteredView::full(&dataset));

    assert_eq!(
        table.cell(0, "Manufacturing costs"),
        Some(&Cell::Number(1.67))
    );
    // No lead times in any row.
    assert_eq!(table.cell(0, "Lead times"), Some(&Cell::Null));
}

#[test]
fn test_location_summary_follows_filter() {
    let dataset = sample();
    let selection = FilterSelection::all(dataset).with_locations(["Delhi"]);
    let result = QueryId::LocationSummary.run(&filter(dataset, &selection));
    let table = result.as_table().unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.cell(0, "Revenue generated").and_then(Cell::as_f64),
        Some(3_500.0)
    );
}

#[test]
fn test_location_summary_totals_without_values_are_zero() {
    let dataset = Dataset::new(vec![Record {
        location: Some("Mumbai".into()),
        ..Default::default()
    }]);
    let table = location_summary(&FilteredView::full(&dataset));

    for column in ["Revenue generated", "Number of products sold", "Production volumes"] {
        let value = table.cell(0, column).and_then(Cell::as_f64).unwrap();
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive(), "{column} is {value}");
    }
}
