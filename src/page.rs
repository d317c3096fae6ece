//! Page router: the six dashboard pages and the widgets each one shows.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dashboard::DashboardError;
use crate::query::QueryId;

/// How an aggregation result is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    Metric,
    Bar,
    Pie,
    Histogram,
    Box,
    Heatmap,
    Scatter,
    Table,
}

/// One chart, table or metric on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Widget {
    pub query: QueryId,
    pub display: DisplayKind,
    pub title: &'static str,
}

const fn widget(query: QueryId, display: DisplayKind, title: &'static str) -> Widget {
    Widget {
        query,
        display,
        title,
    }
}

/// Dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    #[default]
    Overview,
    ProductAnalysis,
    SupplyChainMetrics,
    SupplierLocation,
    ShippingTransportation,
    QualityControl,
}

impl PageId {
    pub const ALL: [PageId; 6] = [
        PageId::Overview,
        PageId::ProductAnalysis,
        PageId::SupplyChainMetrics,
        PageId::SupplierLocation,
        PageId::ShippingTransportation,
        PageId::QualityControl,
    ];

    /// Title shown in the page selector.
    pub fn title(self) -> &'static str {
        match self {
            PageId::Overview => "Overview",
            PageId::ProductAnalysis => "Product Analysis",
            PageId::SupplyChainMetrics => "Supply Chain Metrics",
            PageId::SupplierLocation => "Supplier & Location",
            PageId::ShippingTransportation => "Shipping & Transportation",
            PageId::QualityControl => "Quality Control",
        }
    }

    /// URL-friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            PageId::Overview => "overview",
            PageId::ProductAnalysis => "product-analysis",
            PageId::SupplyChainMetrics => "supply-chain-metrics",
            PageId::SupplierLocation => "supplier-location",
            PageId::ShippingTransportation => "shipping-transportation",
            PageId::QualityControl => "quality-control",
        }
    }

    /// Widgets on this page, in display order.
    pub fn widgets(self) -> &'static [Widget] {
        resolve(self)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for PageId {
    type Err = DashboardError;

    /// Accepts the title, the slug or the variant name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PageId::ALL
            .into_iter()
            .find(|page| {
                wanted.eq_ignore_ascii_case(page.title())
                    || wanted.eq_ignore_ascii_case(page.slug())
                    || wanted.eq_ignore_ascii_case(&format!("{page:?}"))
            })
            .ok_or_else(|| DashboardError::UnknownPage(s.to_string()))
    }
}

use DisplayKind as D;
use QueryId as Q;

const OVERVIEW: &[Widget] = &[
    widget(Q::TotalRevenue, D::Metric, "Total Revenue"),
    widget(Q::ProductsSold, D::Metric, "Products Sold"),
    widget(Q::AvgPrice, D::Metric, "Avg Price"),
    widget(Q::AvgLeadTime, D::Metric, "Avg Lead Time"),
    widget(Q::TotalStock, D::Metric, "Total Stock"),
    widget(Q::RevenueByProductType, D::Bar, "Revenue by Product Type"),
    widget(Q::ProductsSoldByLocation, D::Pie, "Products Sold by Location"),
    widget(Q::StockLevelsDistribution, D::Histogram, "Stock Levels Distribution"),
    widget(Q::LeadTimesDistribution, D::Histogram, "Lead Times Distribution"),
];

const PRODUCT_ANALYSIS: &[Widget] = &[
    widget(Q::AvgPriceByProductType, D::Bar, "Average Price by Product Type"),
    widget(Q::AvgAvailabilityByProductType, D::Bar, "Average Availability by Product Type"),
    widget(Q::PriceVsRevenue, D::Scatter, "Price vs Revenue (size = products sold)"),
    widget(Q::TopProductsByRevenue, D::Table, "Top 10 Products by Revenue"),
];

const SUPPLY_CHAIN_METRICS: &[Widget] = &[
    widget(Q::AvgOrderQuantity, D::Metric, "Avg Order Quantity"),
    widget(Q::AvgShippingTime, D::Metric, "Avg Shipping Time"),
    widget(Q::AvgShippingCost, D::Metric, "Avg Shipping Cost"),
    widget(Q::AvgManufacturingLeadTime, D::Metric, "Avg Mfg Lead Time"),
    widget(Q::LeadTimesByProductType, D::Box, "Lead Times by Product Type"),
    widget(Q::OrderQuantitiesByProductType, D::Box, "Order Quantities by Product Type"),
    widget(Q::CorrelationHeatmap, D::Heatmap, "Correlation Heatmap"),
];

const SUPPLIER_LOCATION: &[Widget] = &[
    widget(Q::RevenueBySupplier, D::Bar, "Revenue by Supplier"),
    widget(Q::ProductionByLocation, D::Bar, "Production Volumes by Location"),
    widget(
        Q::ManufacturingCostsBySupplier,
        D::Box,
        "Manufacturing Costs Distribution by Supplier",
    ),
    widget(Q::LocationSummary, D::Table, "Location Performance Summary"),
];

const SHIPPING_TRANSPORTATION: &[Widget] = &[
    widget(Q::CarrierDistribution, D::Pie, "Shipping Carrier Distribution"),
    widget(Q::TransportModeDistribution, D::Pie, "Transportation Mode Distribution"),
    widget(Q::ShippingCostsByCarrier, D::Box, "Shipping Costs by Carrier"),
    widget(Q::RouteDistribution, D::Bar, "Route Distribution"),
    widget(Q::AvgCostByRoute, D::Bar, "Average Transportation Cost by Route"),
];

const QUALITY_CONTROL: &[Widget] = &[
    widget(Q::PassRate, D::Metric, "Pass Rate"),
    widget(Q::AvgDefectRate, D::Metric, "Avg Defect Rate"),
    widget(Q::PendingInspections, D::Metric, "Pending Inspections"),
    widget(Q::InspectionResultsDistribution, D::Pie, "Inspection Results Distribution"),
    widget(Q::DefectRatesDistribution, D::Histogram, "Defect Rates Distribution"),
    widget(Q::DefectRatesByProductType, D::Box, "Defect Rates by Product Type"),
    widget(Q::QualitySummary, D::Table, "Quality Summary by Product Type"),
];

/// Ordered widgets of a page.
pub fn resolve(page: PageId) -> &'static [Widget] {
    match page {
        PageId::Overview => OVERVIEW,
        PageId::ProductAnalysis => PRODUCT_ANALYSIS,
        PageId::SupplyChainMetrics => SUPPLY_CHAIN_METRICS,
        PageId::SupplierLocation => SUPPLIER_LOCATION,
        PageId::ShippingTransportation => SHIPPING_TRANSPORTATION,
        PageId::QualityControl => QUALITY_CONTROL,
    }
}

/// Resolve a page by name, failing with `UnknownPage`.
pub fn resolve_name(name: &str) -> Result<&'static [Widget], DashboardError> {
    name.parse::<PageId>().map(resolve)
}
