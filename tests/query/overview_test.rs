//! Integration tests for the Overview page queries.

#[path = "../common/mod.rs"]
mod common;

use common::{assert_close, sample};
use supplyboard::filter::{filter, FilterSelection, FilteredView};
use supplyboard::query::{QueryId, HISTOGRAM_BINS};

fn metric(query: QueryId, view: &FilteredView<'_>) -> String {
    let value = query.run(view).as_scalar().expect("scalar");
    query.metric_format().expect("metric").format(value)
}

#[test]
fn test_headline_metrics() {
    let view = FilteredView::full(sample());

    assert_eq!(metric(QueryId::TotalRevenue, &view), "$25,000");
    assert_eq!(metric(QueryId::ProductsSold, &view), "3,600");
    assert_eq!(metric(QueryId::AvgPrice, &view), "$45.00");
    assert_eq!(metric(QueryId::AvgLeadTime, &view), "16.9 days");
    assert_eq!(metric(QueryId::TotalStock, &view), "360");
}

#[test]
fn test_empty_view_metrics() {
    let view = FilteredView::default();

    assert_eq!(QueryId::TotalRevenue.run(&view).as_scalar(), Some(Some(0.0)));
    assert_eq!(QueryId::ProductsSold.run(&view).as_scalar(), Some(Some(0.0)));
    assert_eq!(QueryId::AvgPrice.run(&view).as_scalar(), Some(None));
    assert_eq!(metric(QueryId::AvgPrice, &view), "N/A");
    assert_eq!(metric(QueryId::AvgLeadTime, &view), "N/A");
    assert_eq!(metric(QueryId::TotalRevenue, &view), "$0");
    assert_eq!(metric(QueryId::ProductsSold, &view), "0");

    let total = QueryId::TotalStock.run(&view).as_scalar().flatten().unwrap();
    assert!(total.is_sign_positive());
}

#[test]
fn test_revenue_by_product_type() {
    let view = FilteredView::full(sample());
    let result = QueryId::RevenueByProductType.run(&view);
    let series = result.as_series().unwrap();

    assert_eq!(series.labels, vec!["haircare", "skincare", "cosmetics"]);
    assert_close(series.get("haircare").unwrap(), 7_500.0);
    assert_close(series.get("skincare").unwrap(), 9_500.0);
    assert_close(series.get("cosmetics").unwrap(), 8_000.0);

    let total: f64 = series.values.iter().sum();
    assert_close(total, 25_000.0);
}

#[test]
fn test_products_sold_by_location_respects_filter() {
    let dataset = sample();
    let selection = FilterSelection::all(dataset).with_product_types(["haircare"]);
    let view = filter(dataset, &selection);
    let result = QueryId::ProductsSoldByLocation.run(&view);
    let series = result.as_series().unwrap();

    assert_eq!(series.labels, vec!["Mumbai", "Bangalore", "Delhi"]);
    assert_eq!(series.values, vec![100.0, 400.0, 700.0]);
}

#[test]
fn test_stock_histogram_counts_every_value() {
    let view = FilteredView::full(sample());
    let result = QueryId::StockLevelsDistribution.run(&view);
    let histogram = result.as_histogram().unwrap();

    assert_eq!(histogram.bin_count, HISTOGRAM_BINS);
    assert_eq!(histogram.sample.len(), 8);
    let counted: usize = histogram.bins.iter().map(|b| b.count).sum();
    assert_eq!(counted, 8);
    assert_close(histogram.bins[0].start, 10.0);
    assert_close(histogram.bins[histogram.bins.len() - 1].end, 80.0);
}

#[test]
fn test_every_overview_query_survives_empty_view() {
    let view = FilteredView::default();
    let result = QueryId::LeadTimesDistribution.run(&view);
    assert!(result.as_histogram().unwrap().bins.is_empty());
    assert!(QueryId::RevenueByProductType
        .run(&view)
        .as_series()
        .unwrap()
        .is_empty());
}
