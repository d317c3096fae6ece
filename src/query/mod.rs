//! The aggregation catalog.
//!
//! Every chart and table on the dashboard is fed by exactly one [`QueryId`].
//! A query is a pure function of a [`FilteredView`]: running it twice on the
//! same view yields the same [`AggregationResult`].
//!
//! ```text
//! FilteredView ──► QueryId::run ──► AggregationResult ──► Renderer
//! ```

pub mod result;

use serde::Serialize;

use crate::data::{CategoryColumn, NumericColumn, Record, INSPECTION_PENDING};
use crate::filter::FilteredView;
use crate::format::MetricFormat;
use crate::stats;

pub use result::{
    AggregationResult, Bin, BoxSummary, Cell, CorrelationMatrix, Distribution, Histogram,
    ScatterSeries, Series, Table,
};

/// Bin count used by every histogram on the dashboard.
pub const HISTOGRAM_BINS: usize = 30;

/// Rows kept by the top-products table.
pub const TOP_PRODUCTS: usize = 10;

/// Columns compared by the correlation heatmap, in display order.
pub const CORRELATION_COLUMNS: [NumericColumn; 7] = [
    NumericColumn::Price,
    NumericColumn::StockLevels,
    NumericColumn::LeadTimes,
    NumericColumn::OrderQuantities,
    NumericColumn::ShippingTimes,
    NumericColumn::ProductionVolumes,
    NumericColumn::ManufacturingCosts,
];

/// Named aggregation queries, grouped by the page that shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryId {
    // Overview
    TotalRevenue,
    ProductsSold,
    AvgPrice,
    AvgLeadTime,
    TotalStock,
    RevenueByProductType,
    ProductsSoldByLocation,
    StockLevelsDistribution,
    LeadTimesDistribution,
    // Product analysis
    AvgPriceByProductType,
    AvgAvailabilityByProductType,
    PriceVsRevenue,
    TopProductsByRevenue,
    // Supply chain metrics
    AvgOrderQuantity,
    AvgShippingTime,
    AvgShippingCost,
    AvgManufacturingLeadTime,
    LeadTimesByProductType,
    OrderQuantitiesByProductType,
    CorrelationHeatmap,
    // Supplier & location
    RevenueBySupplier,
    ProductionByLocation,
    ManufacturingCostsBySupplier,
    LocationSummary,
    // Shipping & transportation
    CarrierDistribution,
    TransportModeDistribution,
    ShippingCostsByCarrier,
    RouteDistribution,
    AvgCostByRoute,
    // Quality control
    PassRate,
    AvgDefectRate,
    PendingInspections,
    InspectionResultsDistribution,
    DefectRatesDistribution,
    DefectRatesByProductType,
    QualitySummary,
}

impl QueryId {
    pub const ALL: [QueryId; 36] = [
        QueryId::TotalRevenue,
        QueryId::ProductsSold,
        QueryId::AvgPrice,
        QueryId::AvgLeadTime,
        QueryId::TotalStock,
        QueryId::RevenueByProductType,
        QueryId::ProductsSoldByLocation,
        QueryId::StockLevelsDistribution,
        QueryId::LeadTimesDistribution,
        QueryId::AvgPriceByProductType,
        QueryId::AvgAvailabilityByProductType,
        QueryId::PriceVsRevenue,
        QueryId::TopProductsByRevenue,
        QueryId::AvgOrderQuantity,
        QueryId::AvgShippingTime,
        QueryId::AvgShippingCost,
        QueryId::AvgManufacturingLeadTime,
        QueryId::LeadTimesByProductType,
        QueryId::OrderQuantitiesByProductType,
        QueryId::CorrelationHeatmap,
        QueryId::RevenueBySupplier,
        QueryId::ProductionByLocation,
        QueryId::ManufacturingCostsBySupplier,
        QueryId::LocationSummary,
        QueryId::CarrierDistribution,
        QueryId::TransportModeDistribution,
        QueryId::ShippingCostsByCarrier,
        QueryId::RouteDistribution,
        QueryId::AvgCostByRoute,
        QueryId::PassRate,
        QueryId::AvgDefectRate,
        QueryId::PendingInspections,
        QueryId::InspectionResultsDistribution,
        QueryId::DefectRatesDistribution,
        QueryId::DefectRatesByProductType,
        QueryId::QualitySummary,
    ];

    /// Display format for scalar queries; `None` for everything else.
    pub fn metric_format(self) -> Option<MetricFormat> {
        use QueryId::*;
        let format = match self {
            TotalRevenue => MetricFormat::Currency0,
            ProductsSold | TotalStock => MetricFormat::Count,
            AvgPrice | AvgShippingCost => MetricFormat::Currency2,
            AvgLeadTime | AvgShippingTime | AvgManufacturingLeadTime => MetricFormat::Days1,
            AvgOrderQuantity | PendingInspections => MetricFormat::Whole,
            PassRate => MetricFormat::Percent1,
            AvgDefectRate => MetricFormat::Percent2,
            _ => return None,
        };
        Some(format)
    }

    /// Compute this query over a view.
    pub fn run(self, view: &FilteredView<'_>) -> AggregationResult {
        use CategoryColumn as C;
        use NumericColumn as N;
        use QueryId::*;

        match self {
            TotalRevenue => AggregationResult::scalar(stats::sum(view, N::RevenueGenerated)),
            ProductsSold => AggregationResult::scalar(stats::sum(view, N::ProductsSold)),
            AvgPrice => mean(view, N::Price),
            AvgLeadTime => mean(view, N::LeadTimes),
            TotalStock => AggregationResult::scalar(stats::sum(view, N::StockLevels)),
            RevenueByProductType => {
                AggregationResult::Series(stats::group_sum(view, C::ProductType, N::RevenueGenerated))
            }
            ProductsSoldByLocation => {
                AggregationResult::Series(stats::group_sum(view, C::Location, N::ProductsSold))
            }
            StockLevelsDistribution => histogram(view, N::StockLevels),
            LeadTimesDistribution => histogram(view, N::LeadTimes),

            AvgPriceByProductType => {
                AggregationResult::Series(stats::group_mean(view, C::ProductType, N::Price))
            }
            AvgAvailabilityByProductType => {
                AggregationResult::Series(stats::group_mean(view, C::ProductType, N::Availability))
            }
            PriceVsRevenue => AggregationResult::Scatter(price_vs_revenue(view)),
            TopProductsByRevenue => AggregationResult::Table(top_products(view, TOP_PRODUCTS)),

            AvgOrderQuantity => mean(view, N::OrderQuantities),
            AvgShippingTime => mean(view, N::ShippingTimes),
            AvgShippingCost => mean(view, N::ShippingCosts),
            AvgManufacturingLeadTime => mean(view, N::ManufacturingLeadTime),
            LeadTimesByProductType => distributions(view, C::ProductType, N::LeadTimes),
            OrderQuantitiesByProductType => distributions(view, C::ProductType, N::OrderQuantities),
            CorrelationHeatmap => {
                AggregationResult::Matrix(stats::correlation_matrix(view, &CORRELATION_COLUMNS))
            }

            RevenueBySupplier => {
                AggregationResult::Series(stats::group_sum(view, C::SupplierName, N::RevenueGenerated))
            }
            ProductionByLocation => {
                AggregationResult::Series(stats::group_sum(view, C::Location, N::ProductionVolumes))
            }
            ManufacturingCostsBySupplier => {
                distributions(view, C::SupplierName, N::ManufacturingCosts)
            }
            LocationSummary => AggregationResult::Table(location_summary(view)),

            CarrierDistribution => {
                AggregationResult::Series(stats::value_counts(view, C::ShippingCarriers))
            }
            TransportModeDistribution => {
                AggregationResult::Series(stats::value_counts(view, C::TransportationModes))
            }
            ShippingCostsByCarrier => distributions(view, C::ShippingCarriers, N::ShippingCosts),
            RouteDistribution => AggregationResult::Series(stats::value_counts(view, C::Routes)),
            AvgCostByRoute => AggregationResult::Series(stats::group_mean(view, C::Routes, N::Costs)),

            PassRate => AggregationResult::scalar(stats::pass_rate(view)),
            AvgDefectRate => mean(view, N::DefectRates),
            PendingInspections => AggregationResult::scalar(
                stats::count_eq(view, C::InspectionResults, INSPECTION_PENDING) as f64,
            ),
            InspectionResultsDistribution => {
                AggregationResult::Series(stats::value_counts(view, C::InspectionResults))
            }
            DefectRatesDistribution => histogram(view, N::DefectRates),
            DefectRatesByProductType => distributions(view, C::ProductType, N::DefectRates),
            QualitySummary => AggregationResult::Table(quality_summary(view)),
        }
    }
}

fn mean(view: &FilteredView<'_>, column: NumericColumn) -> AggregationResult {
    AggregationResult::Scalar {
        value: stats::mean(view, column),
    }
}

fn histogram(view: &FilteredView<'_>, column: NumericColumn) -> AggregationResult {
    let sample = stats::values(view, column);
    let bins = stats::histogram(&sample, HISTOGRAM_BINS);
    AggregationResult::Histogram(Histogram {
        sample,
        bin_count: HISTOGRAM_BINS,
        bins,
    })
}

fn distributions(
    view: &FilteredView<'_>,
    key: CategoryColumn,
    column: NumericColumn,
) -> AggregationResult {
    let groups = stats::group_by(view, key)
        .into_iter()
        .map(|group| {
            let sample = stats::values(&group.view(), column);
            let summary = stats::box_summary(&sample);
            Distribution {
                label: group.key.to_string(),
                sample,
                summary,
            }
        })
        .collect();
    AggregationResult::Distributions { groups }
}

/// Points with both Price and Revenue present; size falls back to 0.
fn price_vs_revenue(view: &FilteredView<'_>) -> ScatterSeries {
    let mut series = ScatterSeries::default();
    for record in view.iter() {
        let (Some(x), Some(y)) = (record.price, record.revenue_generated) else {
            continue;
        };
        series.x.push(x);
        series.y.push(y);
        series
            .group
            .push(record.product_type.clone().unwrap_or_default());
        series
            .size
            .push(NumericColumn::ProductsSold.value(record).unwrap_or(0.0));
        series.hover.push(record.sku.clone().unwrap_or_default());
    }
    series
}

/// The `limit` highest-revenue records, ties kept in view order.
///
/// Records without a revenue value are never ranked.
pub fn top_products(view: &FilteredView<'_>, limit: usize) -> Table {
    let mut ranked: Vec<(&Record, f64)> = view
        .iter()
        .filter_map(|r| r.revenue_generated.map(|rev| (r, rev)))
        .collect();
    // Stable: equal revenue keeps original row order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);

    let mut table = Table::new([
        CategoryColumn::Sku.header(),
        CategoryColumn::ProductType.header(),
        NumericColumn::Price.header(),
        NumericColumn::ProductsSold.header(),
        NumericColumn::RevenueGenerated.header(),
    ]);
    for (record, _) in ranked {
        table.push_row(vec![
            Cell::from(record.sku.as_deref()),
            Cell::from(record.product_type.as_deref()),
            Cell::from(record.price),
            Cell::from(record.products_sold),
            Cell::from(record.revenue_generated),
        ]);
    }
    table
}

fn rounded(value: Option<f64>) -> Cell {
    Cell::from(value.map(stats::round2))
}

/// Per-location totals and averages, rounded to two decimals.
pub fn location_summary(view: &FilteredView<'_>) -> Table {
    let mut table = Table::new([
        CategoryColumn::Location.header(),
        NumericColumn::RevenueGenerated.header(),
        NumericColumn::ProductsSold.header(),
        NumericColumn::ProductionVolumes.header(),
        NumericColumn::ManufacturingCosts.header(),
        NumericColumn::LeadTimes.header(),
    ]);

    for group in stats::group_by(view, CategoryColumn::Location) {
        let g = group.view();
        table.push_row(vec![
            Cell::Text(group.key.to_string()),
            rounded(Some(stats::sum(&g, NumericColumn::RevenueGenerated))),
            rounded(Some(stats::sum(&g, NumericColumn::ProductsSold))),
            rounded(Some(stats::sum(&g, NumericColumn::ProductionVolumes))),
            rounded(stats::mean(&g, NumericColumn::ManufacturingCosts)),
            rounded(stats::mean(&g, NumericColumn::LeadTimes)),
        ]);
    }
    table
}

pub const QUALITY_SUMMARY_COLUMNS: [&str; 5] = [
    "Product type",
    "Avg Defect Rate",
    "Min Defect Rate",
    "Max Defect Rate",
    "Pass Rate (%)",
];

/// Defect-rate spread and pass rate per product type, rounded to two decimals.
pub fn quality_summary(view: &FilteredView<'_>) -> Table {
    let mut table = Table::new(QUALITY_SUMMARY_COLUMNS);

    for group in stats::group_by(view, CategoryColumn::ProductType) {
        let g = group.view();
        let defects = stats::values(&g, NumericColumn::DefectRates);
        table.push_row(vec![
            Cell::Text(group.key.to_string()),
            rounded(stats::mean_of(&defects)),
            rounded(stats::min_of(&defects)),
            rounded(stats::max_of(&defects)),
            rounded(Some(stats::pass_rate(&g))),
        ]);
    }
    table
}
