//! Integration tests for the Shipping & Transportation page queries.

#[path = "../common/mod.rs"]
mod common;

use common::{assert_close, sample};
use supplyboard::data::{Dataset, Record};
use supplyboard::filter::{filter, FilterSelection, FilteredView};
use supplyboard::query::QueryId;

#[test]
fn test_carrier_counts_tie_in_first_appearance_order() {
    let view = FilteredView::full(sample());
    let result = QueryId::CarrierDistribution.run(&view);
    let series = result.as_series().unwrap();

    assert_eq!(series.labels, vec!["Carrier A", "Carrier B", "Carrier C"]);
    assert_eq!(series.values, vec![3.0, 3.0, 2.0]);
}

#[test]
fn test_transport_modes_sum_to_row_count() {
    let view = FilteredView::full(sample());
    let result = QueryId::TransportModeDistribution.run(&view);
    let series = result.as_series().unwrap();

    assert_eq!(series.labels, vec!["Road", "Air", "Sea", "Rail"]);
    assert_close(series.values.iter().sum(), view.len() as f64);
}

#[test]
fn test_value_counts_descending() {
    let rec = |carrier: &str| Record {
        shipping_carriers: Some(carrier.into()),
        ..Default::default()
    };
    let dataset = Dataset::new(vec![rec("A"), rec("B"), rec("B"), rec("C"), rec("B"), rec("A")]);
    let result = QueryId::CarrierDistribution.run(&FilteredView::full(&dataset));
    let series = result.as_series().unwrap();

    assert_eq!(series.labels, vec!["B", "A", "C"]);
    assert_eq!(series.values, vec![3.0, 2.0, 1.0]);
}

#[test]
fn test_routes_and_average_cost() {
    let view = FilteredView::full(sample());

    let result = QueryId::RouteDistribution.run(&view);
    let routes = result.as_series().unwrap();
    assert_eq!(routes.labels, vec!["Route A", "Route B", "Route C"]);
    assert_eq!(routes.values, vec![3.0, 3.0, 2.0]);

    let result = QueryId::AvgCostByRoute.run(&view);
    let costs = result.as_series().unwrap();
    assert_close(costs.get("Route A").unwrap(), 400.0);
    assert_close(costs.get("Route B").unwrap(), 500.0);
    assert_close(costs.get("Route C").unwrap(), 450.0);
}

#[test]
fn test_shipping_costs_by_carrier() {
    let dataset = sample();
    let selection = FilterSelection::all(dataset).with_product_types(["skincare"]);
    let result = QueryId::ShippingCostsByCarrier.run(&filter(dataset, &selection));
    let groups = result.as_distributions().unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "Carrier B");
    assert_eq!(groups[0].sample, vec![4.5, 1.5, 7.5]);
    let summary = groups[0].summary.as_ref().unwrap();
    assert_close(summary.median, 4.5);
    assert_close(summary.lower_whisker, 1.5);
    assert_close(summary.upper_whisker, 7.5);
}
