//! CSV loading and the process-wide dataset cache.
//!
//! The dataset is read once and kept for the lifetime of the process.
//! Every later call to [`load`] returns the same `&'static Dataset`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use once_cell::sync::OnceCell;

use super::{required_headers, CategoryColumn, Dataset, NumericColumn, Record};

/// Errors that make the dataset unavailable.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Data file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read data file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data file has no header row")]
    MissingHeader,

    #[error("Required column missing: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid value {value:?} in column '{column}' at line {line}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

pub type DataResult<T> = Result<T, DataError>;

static DATASET: OnceCell<Dataset> = OnceCell::new();

/// Load the dataset at `path`, reading it only on the first call.
///
/// Concurrent first calls converge on a single cached dataset. A call with a
/// different path after the cache is filled still returns the cached dataset.
pub fn load(path: impl AsRef<Path>) -> DataResult<&'static Dataset> {
    let path = path.as_ref();
    let dataset = DATASET.get_or_try_init(|| Dataset::from_path(path))?;

    if dataset.source() != Some(path) {
        tracing::warn!(
            requested = %path.display(),
            cached = ?dataset.source(),
            "dataset already loaded from another path; using cached copy"
        );
    }

    Ok(dataset)
}

/// The cached dataset, if [`load`] has succeeded.
pub fn cached() -> Option<&'static Dataset> {
    DATASET.get()
}

impl Dataset {
    /// Read and validate a CSV file without touching the cache.
    pub fn from_path(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DataError::NotFound(path.to_path_buf()),
            _ => DataError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let dataset = Self::from_reader(BufReader::new(file))?.with_source(path);
        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            "loaded supply chain dataset"
        );
        Ok(dataset)
    }

    /// Parse CSV text from any reader.
    ///
    /// Columns the dashboard does not use are ignored. Cells are trimmed and
    /// empty cells become nulls.
    pub fn from_reader<R: Read>(reader: R) -> DataResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(DataError::MissingHeader);
        }
        let schema = Schema::from_headers(&headers)?;

        let mut records = Vec::new();
        for (index, row) in csv_reader.records().enumerate() {
            let row = row?;
            // Header is line 1.
            let line = row
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);
            records.push(schema.parse_record(&row, line)?);
        }

        Ok(Dataset::new(records))
    }
}

// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
const I64_MIN: f64 = i64::MIN as f64;
const I64_MAX: f64 = i64::MAX as f64;

/// Header name to field index, validated against the required columns.
struct Schema {
    index: HashMap<&'static str, usize>,
}

impl Schema {
    fn from_headers(headers: &StringRecord) -> DataResult<Self> {
        let mut index = HashMap::new();
        for name in required_headers() {
            let position = headers
                .iter()
                .position(|h| h == name)
                .ok_or(DataError::MissingColumn(name))?;
            index.insert(name, position);
        }
        Ok(Self { index })
    }

    fn cell<'r>(&self, row: &'r StringRecord, column: &'static str) -> Option<&'r str> {
        self.index
            .get(column)
            .and_then(|&i| row.get(i))
            .filter(|s| !s.is_empty())
    }

    fn text(&self, row: &StringRecord, column: CategoryColumn) -> Option<String> {
        self.cell(row, column.header()).map(str::to_string)
    }

    fn float(&self, row: &StringRecord, column: NumericColumn, line: u64) -> DataResult<Option<f64>> {
        let Some(raw) = self.cell(row, column.header()) else {
            return Ok(None);
        };
        match raw.parse::<f64>() {
            Ok(v) if v.is_nan() => Ok(None),
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(invalid(line, column, raw)),
        }
    }

    fn integer(&self, row: &StringRecord, column: NumericColumn, line: u64) -> DataResult<Option<i64>> {
        let Some(raw) = self.cell(row, column.header()) else {
            return Ok(None);
        };
        if let Ok(v) = raw.parse::<i64>() {
            return Ok(Some(v));
        }
        // Integral floats such as "12.0" show up in exported sheets.
        match raw.parse::<f64>() {
            Ok(v) if v.is_nan() => Ok(None),
            Ok(v) if v.fract() == 0.0 && (I64_MIN..I64_MAX).contains(&v) => Ok(Some(v as i64)),
            _ => Err(invalid(line, column, raw)),
        }
    }

    fn parse_record(&self, row: &StringRecord, line: u64) -> DataResult<Record> {
        use CategoryColumn as C;
        use NumericColumn as N;

        Ok(Record {
            sku: self.text(row, C::Sku),
            product_type: self.text(row, C::ProductType),
            location: self.text(row, C::Location),
            price: self.float(row, N::Price, line)?,
            revenue_generated: self.float(row, N::RevenueGenerated, line)?,
            products_sold: self.integer(row, N::ProductsSold, line)?,
            stock_levels: self.integer(row, N::StockLevels, line)?,
            lead_times: self.integer(row, N::LeadTimes, line)?,
            order_quantities: self.integer(row, N::OrderQuantities, line)?,
            shipping_times: self.integer(row, N::ShippingTimes, line)?,
            shipping_costs: self.float(row, N::ShippingCosts, line)?,
            manufacturing_lead_time: self.integer(row, N::ManufacturingLeadTime, line)?,
            production_volumes: self.integer(row, N::ProductionVolumes, line)?,
            manufacturing_costs: self.float(row, N::ManufacturingCosts, line)?,
            supplier_name: self.text(row, C::SupplierName),
            shipping_carriers: self.text(row, C::ShippingCarriers),
            transportation_modes: self.text(row, C::TransportationModes),
            routes: self.text(row, C::Routes),
            costs: self.float(row, N::Costs, line)?,
            availability: self.float(row, N::Availability, line)?,
            defect_rates: self.float(row, N::DefectRates, line)?,
            inspection_results: self.text(row, C::InspectionResults),
        })
    }
}

fn invalid(line: u64, column: NumericColumn, raw: &str) -> DataError {
    DataError::InvalidValue {
        line,
        column: column.header(),
        value: raw.to_string(),
    }
}
