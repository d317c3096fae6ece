//! Result shapes produced by aggregation queries.
//!
//! These are the values handed to a [`Renderer`](crate::render::Renderer).
//! All of them serialize to JSON for the web API.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Output of one aggregation query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationResult {
    /// A single number. `None` when the value is undefined (mean of no rows).
    Scalar { value: Option<f64> },
    /// Category labels with one value each.
    Series(Series),
    /// Raw sample plus equal-width bins.
    Histogram(Histogram),
    /// Per-category samples with box-plot summaries.
    Distributions { groups: Vec<Distribution> },
    /// Pairwise correlation matrix.
    Matrix(CorrelationMatrix),
    /// Point cloud for a scatter chart.
    Scatter(ScatterSeries),
    /// Ranked or grouped rows.
    Table(Table),
}

impl AggregationResult {
    pub fn scalar(value: f64) -> Self {
        AggregationResult::Scalar { value: Some(value) }
    }

    /// The scalar value, if this is a scalar result.
    pub fn as_scalar(&self) -> Option<Option<f64>> {
        match self {
            AggregationResult::Scalar { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<&Series> {
        match self {
            AggregationResult::Series(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&Histogram> {
        match self {
            AggregationResult::Histogram(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_distributions(&self) -> Option<&[Distribution]> {
        match self {
            AggregationResult::Distributions { groups } => Some(groups),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&CorrelationMatrix> {
        match self {
            AggregationResult::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_scatter(&self) -> Option<&ScatterSeries> {
        match self {
            AggregationResult::Scatter(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            AggregationResult::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Short name of the result shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            AggregationResult::Scalar { .. } => "scalar",
            AggregationResult::Series(_) => "series",
            AggregationResult::Histogram(_) => "histogram",
            AggregationResult::Distributions { .. } => "distributions",
            AggregationResult::Matrix(_) => "matrix",
            AggregationResult::Scatter(_) => "scatter",
            AggregationResult::Table(_) => "table",
        }
    }
}

/// Keyed values in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    /// Value for a label, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Half-open bin `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub sample: Vec<f64>,
    pub bin_count: usize,
    pub bins: Vec<Bin>,
}

/// Five-number summary with 1.5 x IQR outliers.
///
/// Whiskers reach the most extreme samples inside the fences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub label: String,
    pub sample: Vec<f64>,
    pub summary: Option<BoxSummary>,
}

/// Square correlation matrix; `None` where a coefficient is undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub group: Vec<String>,
    pub size: Vec<f64>,
    pub hover: Vec<String>,
}

impl ScatterSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
    Null,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(n) => Some(*n as f64),
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Null, Cell::Number)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Cell::Null, Cell::Integer)
    }
}

impl From<Option<&str>> for Cell {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Cell::Null, |s| Cell::Text(s.to_string()))
    }
}

/// Rows of cells under named columns.
///
/// Serializes each row as an object keyed by column name, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` under `column`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterate rows as `(column, cell)` pairs.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &Cell)>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
    }
}

struct RowRef<'a> {
    columns: &'a [String],
    cells: &'a [Cell],
}

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<RowRef<'_>> = self
            .rows
            .iter()
            .map(|cells| RowRef {
                columns: &self.columns,
                cells,
            })
            .collect();

        let mut state = serializer.serialize_struct("Table", 2)?;
        state.serialize_field("columns", &self.columns)?;
        state.serialize_field("rows", &rows)?;
        state.end()
    }
}
