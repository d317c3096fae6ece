//! Supply-chain dataset: typed records, column selectors and the loader.
//!
//! The CSV is validated once at load time and turned into a `Vec<Record>`.
//! Everything downstream addresses columns through the closed
//! [`NumericColumn`] and [`CategoryColumn`] enums instead of header strings.

pub mod loader;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub use loader::{cached, load, DataError, DataResult};

/// Inspection result value counted as a pass.
pub const INSPECTION_PASS: &str = "Pass";
/// Inspection result value counted as pending.
pub const INSPECTION_PENDING: &str = "Pending";

/// One row of the supply-chain dataset.
///
/// Every column may be null (an empty cell in the source file).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub sku: Option<String>,
    pub product_type: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub revenue_generated: Option<f64>,
    pub products_sold: Option<i64>,
    pub stock_levels: Option<i64>,
    pub lead_times: Option<i64>,
    pub order_quantities: Option<i64>,
    pub shipping_times: Option<i64>,
    pub shipping_costs: Option<f64>,
    pub manufacturing_lead_time: Option<i64>,
    pub production_volumes: Option<i64>,
    pub manufacturing_costs: Option<f64>,
    pub supplier_name: Option<String>,
    pub shipping_carriers: Option<String>,
    pub transportation_modes: Option<String>,
    pub routes: Option<String>,
    pub costs: Option<f64>,
    pub availability: Option<f64>,
    pub defect_rates: Option<f64>,
    pub inspection_results: Option<String>,
}

/// Numeric columns of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Price,
    RevenueGenerated,
    ProductsSold,
    StockLevels,
    LeadTimes,
    OrderQuantities,
    ShippingTimes,
    ShippingCosts,
    ManufacturingLeadTime,
    ProductionVolumes,
    ManufacturingCosts,
    Costs,
    Availability,
    DefectRates,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 14] = [
        NumericColumn::Price,
        NumericColumn::RevenueGenerated,
        NumericColumn::ProductsSold,
        NumericColumn::StockLevels,
        NumericColumn::LeadTimes,
        NumericColumn::OrderQuantities,
        NumericColumn::ShippingTimes,
        NumericColumn::ShippingCosts,
        NumericColumn::ManufacturingLeadTime,
        NumericColumn::ProductionVolumes,
        NumericColumn::ManufacturingCosts,
        NumericColumn::Costs,
        NumericColumn::Availability,
        NumericColumn::DefectRates,
    ];

    /// Exact CSV header of this column.
    pub fn header(self) -> &'static str {
        match self {
            NumericColumn::Price => "Price",
            NumericColumn::RevenueGenerated => "Revenue generated",
            NumericColumn::ProductsSold => "Number of products sold",
            NumericColumn::StockLevels => "Stock levels",
            NumericColumn::LeadTimes => "Lead times",
            NumericColumn::OrderQuantities => "Order quantities",
            NumericColumn::ShippingTimes => "Shipping times",
            NumericColumn::ShippingCosts => "Shipping costs",
            NumericColumn::ManufacturingLeadTime => "Manufacturing lead time",
            NumericColumn::ProductionVolumes => "Production volumes",
            NumericColumn::ManufacturingCosts => "Manufacturing costs",
            NumericColumn::Costs => "Costs",
            NumericColumn::Availability => "Availability",
            NumericColumn::DefectRates => "Defect rates",
        }
    }

    /// Whether the column holds whole numbers (counts, days, units).
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            NumericColumn::ProductsSold
                | NumericColumn::StockLevels
                | NumericColumn::LeadTimes
                | NumericColumn::OrderQuantities
                | NumericColumn::ShippingTimes
                | NumericColumn::ManufacturingLeadTime
                | NumericColumn::ProductionVolumes
        )
    }

    /// Read this column from a record, widening integers to `f64`.
    pub fn value(self, record: &Record) -> Option<f64> {
        let int = |v: Option<i64>| v.map(|n| n as f64);
        match self {
            NumericColumn::Price => record.price,
            NumericColumn::RevenueGenerated => record.revenue_generated,
            NumericColumn::ProductsSold => int(record.products_sold),
            NumericColumn::StockLevels => int(record.stock_levels),
            NumericColumn::LeadTimes => int(record.lead_times),
            NumericColumn::OrderQuantities => int(record.order_quantities),
            NumericColumn::ShippingTimes => int(record.shipping_times),
            NumericColumn::ShippingCosts => record.shipping_costs,
            NumericColumn::ManufacturingLeadTime => int(record.manufacturing_lead_time),
            NumericColumn::ProductionVolumes => int(record.production_volumes),
            NumericColumn::ManufacturingCosts => record.manufacturing_costs,
            NumericColumn::Costs => record.costs,
            NumericColumn::Availability => record.availability,
            NumericColumn::DefectRates => record.defect_rates,
        }
    }
}

/// Text columns of a [`Record`]: the SKU identifier and the categorical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryColumn {
    Sku,
    ProductType,
    Location,
    SupplierName,
    ShippingCarriers,
    TransportationModes,
    Routes,
    InspectionResults,
}

impl CategoryColumn {
    pub const ALL: [CategoryColumn; 8] = [
        CategoryColumn::Sku,
        CategoryColumn::ProductType,
        CategoryColumn::Location,
        CategoryColumn::SupplierName,
        CategoryColumn::ShippingCarriers,
        CategoryColumn::TransportationModes,
        CategoryColumn::Routes,
        CategoryColumn::InspectionResults,
    ];

    /// Exact CSV header of this column.
    pub fn header(self) -> &'static str {
        match self {
            CategoryColumn::Sku => "SKU",
            CategoryColumn::ProductType => "Product type",
            CategoryColumn::Location => "Location",
            CategoryColumn::SupplierName => "Supplier name",
            CategoryColumn::ShippingCarriers => "Shipping carriers",
            CategoryColumn::TransportationModes => "Transportation modes",
            CategoryColumn::Routes => "Routes",
            CategoryColumn::InspectionResults => "Inspection results",
        }
    }

    pub fn value(self, record: &Record) -> Option<&str> {
        let field = match self {
            CategoryColumn::Sku => &record.sku,
            CategoryColumn::ProductType => &record.product_type,
            CategoryColumn::Location => &record.location,
            CategoryColumn::SupplierName => &record.supplier_name,
            CategoryColumn::ShippingCarriers => &record.shipping_carriers,
            CategoryColumn::TransportationModes => &record.transportation_modes,
            CategoryColumn::Routes => &record.routes,
            CategoryColumn::InspectionResults => &record.inspection_results,
        };
        field.as_deref()
    }
}

/// Headers the source file must carry.
pub fn required_headers() -> impl Iterator<Item = &'static str> {
    CategoryColumn::ALL
        .iter()
        .map(|c| c.header())
        .chain(NumericColumn::ALL.iter().map(|c| c.header()))
}

/// The immutable, in-memory dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    source: Option<PathBuf>,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from already-parsed records.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            source: None,
            records,
        }
    }

    pub(crate) fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    /// Path the dataset was read from, if it came from a file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-null values of a column, in first-appearance order.
    pub fn distinct(&self, column: CategoryColumn) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| column.value(r))
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Options for the Product type filter.
    pub fn product_types(&self) -> Vec<&str> {
        self.distinct(CategoryColumn::ProductType)
    }

    /// Options for the Location filter.
    pub fn locations(&self) -> Vec<&str> {
        self.distinct(CategoryColumn::Location)
    }
}
