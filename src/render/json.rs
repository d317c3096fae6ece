//! JSON rendering: one document per page.

use serde_json::{json, Value};

use super::{RenderResult, Renderer};
use crate::page::PageId;
use crate::query::{CorrelationMatrix, Distribution, Histogram, ScatterSeries, Series, Table};

/// Collects widgets into a JSON page document.
///
/// ```text
/// { "page": "overview", "title": "Overview", "data_points": 100,
///   "widgets": [ { "display": "metric", "label": ..., "value": ... }, ... ] }
/// ```
#[derive(Debug, Default)]
pub struct JsonRenderer {
    page: Option<PageId>,
    data_points: Option<usize>,
    widgets: Vec<Value>,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widgets collected so far.
    pub fn widgets(&self) -> &[Value] {
        &self.widgets
    }

    /// The finished page document.
    pub fn into_value(self) -> Value {
        json!({
            "page": self.page.map(|p| p.slug()),
            "title": self.page.map(|p| p.title()),
            "data_points": self.data_points,
            "widgets": self.widgets,
        })
    }

    fn push(&mut self, widget: Value) -> RenderResult<()> {
        self.widgets.push(widget);
        Ok(())
    }

    fn series(display: &str, title: &str, series: &Series) -> Value {
        json!({
            "display": display,
            "title": title,
            "labels": series.labels,
            "values": series.values,
        })
    }
}

impl Renderer for JsonRenderer {
    fn begin_page(&mut self, page: PageId) -> RenderResult<()> {
        self.page = Some(page);
        self.widgets.clear();
        Ok(())
    }

    fn end_page(&mut self, data_points: usize) -> RenderResult<()> {
        self.data_points = Some(data_points);
        Ok(())
    }

    fn metric(&mut self, label: &str, value: &str) -> RenderResult<()> {
        self.push(json!({ "display": "metric", "label": label, "value": value }))
    }

    fn bar(&mut self, title: &str, series: &Series) -> RenderResult<()> {
        self.push(Self::series("bar", title, series))
    }

    fn pie(&mut self, title: &str, series: &Series) -> RenderResult<()> {
        self.push(Self::series("pie", title, series))
    }

    fn histogram(&mut self, title: &str, histogram: &Histogram) -> RenderResult<()> {
        self.push(json!({
            "display": "histogram",
            "title": title,
            "sample": histogram.sample,
            "bin_count": histogram.bin_count,
            "bins": serde_json::to_value(&histogram.bins)?,
        }))
    }

    fn boxplot(&mut self, title: &str, groups: &[Distribution]) -> RenderResult<()> {
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        let samples: Vec<&[f64]> = groups.iter().map(|g| g.sample.as_slice()).collect();
        let summaries = groups
            .iter()
            .map(|g| serde_json::to_value(&g.summary))
            .collect::<Result<Vec<_>, _>>()?;
        self.push(json!({
            "display": "box",
            "title": title,
            "labels": labels,
            "samples": samples,
            "summaries": summaries,
        }))
    }

    fn heatmap(&mut self, title: &str, matrix: &CorrelationMatrix) -> RenderResult<()> {
        self.push(json!({
            "display": "heatmap",
            "title": title,
            "row_labels": matrix.labels,
            "column_labels": matrix.labels,
            "matrix": matrix.values,
        }))
    }

    fn scatter(&mut self, title: &str, points: &ScatterSeries) -> RenderResult<()> {
        self.push(json!({
            "display": "scatter",
            "title": title,
            "x": points.x,
            "y": points.y,
            "color": points.group,
            "size": points.size,
            "hover": points.hover,
        }))
    }

    fn table(&mut self, title: &str, table: &Table) -> RenderResult<()> {
        let mut value = serde_json::to_value(table)?;
        if let Value::Object(map) = &mut value {
            map.insert("display".to_string(), json!("table"));
            map.insert("title".to_string(), json!(title));
        }
        self.push(value)
    }
}
