//! Integration tests for the Supply Chain Metrics page queries.

#[path = "../common/mod.rs"]
mod common;

use common::{assert_close, sample};
use supplyboard::data::{Dataset, NumericColumn, Record};
use supplyboard::filter::FilteredView;
use supplyboard::query::{QueryId, CORRELATION_COLUMNS};

fn metric(query: QueryId, view: &FilteredView<'_>) -> String {
    let value = query.run(view).as_scalar().expect("scalar");
    query.metric_format().expect("metric").format(value)
}

#[test]
fn test_supply_chain_metrics() {
    let view = FilteredView::full(sample());

    assert_eq!(metric(QueryId::AvgOrderQuantity, &view), "45");
    assert_eq!(metric(QueryId::AvgShippingTime, &view), "4.5 days");
    assert_eq!(metric(QueryId::AvgShippingCost, &view), "$5.00");
    assert_eq!(metric(QueryId::AvgManufacturingLeadTime, &view), "14.1 days");
}

#[test]
fn test_lead_time_distributions_per_product_type() {
    let view = FilteredView::full(sample());
    let result = QueryId::LeadTimesByProductType.run(&view);
    let groups = result.as_distributions().unwrap();

    let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["haircare", "skincare", "cosmetics"]);

    let haircare = &groups[0];
    assert_eq!(haircare.sample, vec![10.0, 5.0, 12.0]);
    let summary = haircare.summary.as_ref().unwrap();
    assert_close(summary.min, 5.0);
    assert_close(summary.q1, 7.5);
    assert_close(summary.median, 10.0);
    assert_close(summary.q3, 11.0);
    assert_close(summary.max, 12.0);
    assert!(summary.outliers.is_empty());
}

#[test]
fn test_correlation_matrix_is_symmetric_with_unit_diagonal() {
    let view = FilteredView::full(sample());
    let result = QueryId::CorrelationHeatmap.run(&view);
    let matrix = result.as_matrix().unwrap();

    let n = CORRELATION_COLUMNS.len();
    assert_eq!(matrix.labels.len(), n);
    assert_eq!(matrix.labels[0], NumericColumn::Price.header());

    for i in 0..n {
        assert_close(matrix.get(i, i).unwrap(), 1.0);
        for j in 0..n {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
            if let Some(r) = matrix.get(i, j) {
                assert!((-1.0..=1.0).contains(&r));
            }
        }
    }

    // Price and Production volumes rise together in the sample.
    let production = CORRELATION_COLUMNS
        .iter()
        .position(|c| *c == NumericColumn::ProductionVolumes)
        .unwrap();
    assert_close(matrix.get(0, production).unwrap(), 1.0);
}

#[test]
fn test_correlation_undefined_for_constant_column() {
    let records: Vec<Record> = [1.0, 2.0, 3.0]
        .into_iter()
        .map(|price| Record {
            price: Some(price),
            stock_levels: Some(7),
            ..Default::default()
        })
        .collect();
    let dataset = Dataset::new(records);
    let result = QueryId::CorrelationHeatmap.run(&FilteredView::full(&dataset));
    let matrix = result.as_matrix().unwrap();

    assert_eq!(matrix.get(0, 1), None);
    assert_eq!(matrix.get(1, 1), None);
    assert_close(matrix.get(0, 0).unwrap(), 1.0);
}

#[test]
fn test_empty_view_has_no_distributions() {
    let result = QueryId::OrderQuantitiesByProductType.run(&FilteredView::default());
    assert!(result.as_distributions().unwrap().is_empty());
}
