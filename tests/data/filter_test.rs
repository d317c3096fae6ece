//! Integration tests for the Product type / Location filter.

#[path = "../common/mod.rs"]
mod common;

use common::{assert_close, record, sample};
use supplyboard::data::{Dataset, NumericColumn};
use supplyboard::filter::{filter, FilterSelection, FilteredView};
use supplyboard::stats;

#[test]
fn test_default_selection_keeps_every_row() {
    let dataset = sample();
    let view = filter(dataset, &FilterSelection::all(dataset));
    assert_eq!(view.len(), dataset.len());
    assert_eq!(view, FilteredView::full(dataset));
}

#[test]
fn test_filtered_rows_are_members_of_both_sets() {
    let dataset = sample();
    let selection = FilterSelection::new(["haircare", "cosmetics"], ["Delhi", "Mumbai"]);
    let view = filter(dataset, &selection);

    assert!(view.len() <= dataset.len());
    for r in view.iter() {
        assert!(selection.product_types().contains(r.product_type.as_deref().unwrap()));
        assert!(selection.locations().contains(r.location.as_deref().unwrap()));
    }
    let skus: Vec<_> = view.iter().filter_map(|r| r.sku.as_deref()).collect();
    assert_eq!(skus, vec!["SKU0", "SKU2", "SKU6"]);
}

#[test]
fn test_filter_is_idempotent() {
    let dataset = sample();
    let selection = FilterSelection::all(dataset).with_locations(["Kolkata", "Bangalore"]);
    let once = filter(dataset, &selection);
    let twice = once.refilter(&selection);
    assert_eq!(once, twice);
}

#[test]
fn test_partition_sums_add_up() {
    let dataset = sample();
    let total = stats::sum(&FilteredView::full(dataset), NumericColumn::RevenueGenerated);

    let parts: f64 = dataset
        .product_types()
        .into_iter()
        .map(|t| {
            let selection = FilterSelection::all(dataset).with_product_types([t]);
            stats::sum(&filter(dataset, &selection), NumericColumn::RevenueGenerated)
        })
        .sum();

    assert_close(parts, total);
    assert_close(total, 25_000.0);
}

#[test]
fn test_empty_dimension_yields_empty_view() {
    let dataset = sample();
    let no_types = FilterSelection::all(dataset).with_product_types(Vec::<String>::new());
    assert!(no_types.is_empty());
    assert!(filter(dataset, &no_types).is_empty());

    let no_locations = FilterSelection::all(dataset).with_locations(Vec::<String>::new());
    assert!(filter(dataset, &no_locations).is_empty());
}

#[test]
fn test_unknown_value_matches_nothing() {
    let dataset = sample();
    let selection = FilterSelection::all(dataset).with_product_types(["toys"]);
    assert!(filter(dataset, &selection).is_empty());
}

#[test]
fn test_null_dimension_never_matches() {
    let mut orphan = record("haircare", "Mumbai");
    orphan.location = None;
    let dataset = Dataset::new(vec![record("haircare", "Mumbai"), orphan]);

    let view = filter(&dataset, &FilterSelection::all(&dataset));
    assert_eq!(view.len(), 1);
}
