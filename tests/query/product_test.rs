//! Integration tests for the Product Analysis page queries.

#[path = "../common/mod.rs"]
mod common;

use common::{assert_close, sample};
use supplyboard::data::{Dataset, Record};
use supplyboard::filter::{filter, FilterSelection, FilteredView};
use supplyboard::query::{top_products, Cell, QueryId, TOP_PRODUCTS};

#[test]
fn test_avg_price_by_product_type() {
    let view = FilteredView::full(sample());
    let result = QueryId::AvgPriceByProductType.run(&view);
    let series = result.as_series().unwrap();

    // haircare: 10, 40, 70; skincare: 20, 50, 80; cosmetics: 30, 60
    assert_close(series.get("haircare").unwrap(), 40.0);
    assert_close(series.get("skincare").unwrap(), 50.0);
    assert_close(series.get("cosmetics").unwrap(), 45.0);
}

#[test]
fn test_avg_availability_by_product_type() {
    let view = FilteredView::full(sample());
    let result = QueryId::AvgAvailabilityByProductType.run(&view);
    let series = result.as_series().unwrap();

    assert_close(series.get("haircare").unwrap(), 160.0 / 3.0);
    assert_close(series.get("skincare").unwrap(), 170.0 / 3.0);
    assert_close(series.get("cosmetics").unwrap(), 55.0);
}

#[test]
fn test_price_vs_revenue_points() {
    let dataset = sample();
    let selection = FilterSelection::all(dataset).with_locations(["Mumbai"]);
    let view = filter(dataset, &selection);
    let result = QueryId::PriceVsRevenue.run(&view);
    let scatter = result.as_scatter().unwrap();

    assert_eq!(scatter.len(), 2);
    assert_eq!(scatter.x, vec![10.0, 50.0]);
    assert_eq!(scatter.y, vec![1000.0, 4000.0]);
    assert_eq!(scatter.group, vec!["haircare", "skincare"]);
    assert_eq!(scatter.size, vec![100.0, 500.0]);
    assert_eq!(scatter.hover, vec!["SKU0", "SKU4"]);
}

#[test]
fn test_top_products_ranked_by_revenue() {
    let view = FilteredView::full(sample());
    let result = QueryId::TopProductsByRevenue.run(&view);
    let table = result.as_table().unwrap();

    assert_eq!(
        table.columns,
        vec![
            "SKU",
            "Product type",
            "Price",
            "Number of products sold",
            "Revenue generated"
        ]
    );
    assert_eq!(table.len(), 8);

    let skus: Vec<_> = (0..table.len())
        .map(|i| table.cell(i, "SKU").and_then(Cell::as_str).unwrap())
        .collect();
    assert_eq!(
        skus,
        vec!["SKU5", "SKU3", "SKU4", "SKU1", "SKU7", "SKU2", "SKU6", "SKU0"]
    );

    let revenue: Vec<f64> = (0..table.len())
        .map(|i| table.cell(i, "Revenue generated").and_then(Cell::as_f64).unwrap())
        .collect();
    assert!(revenue.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_top_products_caps_at_ten() {
    let records: Vec<Record> = (0..25_i32)
        .map(|i| Record {
            sku: Some(format!("SKU{i}")),
            revenue_generated: Some(f64::from(i)),
            ..Default::default()
        })
        .collect();
    let dataset = Dataset::new(records);
    let table = top_products(&FilteredView::full(&dataset), TOP_PRODUCTS);

    assert_eq!(table.len(), 10);
    assert_eq!(table.cell(0, "SKU").and_then(Cell::as_str), Some("SKU24"));
    assert_eq!(table.cell(9, "SKU").and_then(Cell::as_str), Some("SKU15"));
}

#[test]
fn test_top_products_on_empty_view() {
    let table = top_products(&FilteredView::default(), TOP_PRODUCTS);
    assert!(table.is_empty());
    assert_eq!(table.columns.len(), 5);
}
