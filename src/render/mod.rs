//! Render boundary.
//!
//! A [`Renderer`] receives fully computed inputs, one method per
//! [`DisplayKind`]; it never aggregates anything itself. Two renderers ship
//! with the crate:
//!
//! - [`TextRenderer`] - plain text for terminals
//! - [`JsonRenderer`] - JSON documents for the web API and `--format json`

mod json;
mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use std::io;

use crate::format::{zero_unless_visible, MetricFormat};
use crate::page::{DisplayKind, PageId, Widget};
use crate::query::{
    AggregationResult, CorrelationMatrix, Distribution, Histogram, ScatterSeries, Series, Table,
};

/// Shown in place of a chart that has nothing to draw.
pub const EMPTY_PLACEHOLDER: &str = "No data for the current selection";

/// Errors raised while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Widget '{title}' is drawn as {display:?} but its query produced a {shape}")]
    ShapeMismatch {
        title: &'static str,
        display: DisplayKind,
        shape: &'static str,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Consumer of computed widget inputs.
pub trait Renderer {
    /// Called once before the first widget of a page.
    fn begin_page(&mut self, _page: PageId) -> RenderResult<()> {
        Ok(())
    }

    /// Called once after the last widget, with the number of rows in view.
    fn end_page(&mut self, _data_points: usize) -> RenderResult<()> {
        Ok(())
    }

    fn metric(&mut self, label: &str, value: &str) -> RenderResult<()>;

    fn bar(&mut self, title: &str, series: &Series) -> RenderResult<()>;

    fn pie(&mut self, title: &str, series: &Series) -> RenderResult<()>;

    fn histogram(&mut self, title: &str, histogram: &Histogram) -> RenderResult<()>;

    fn boxplot(&mut self, title: &str, groups: &[Distribution]) -> RenderResult<()>;

    fn heatmap(&mut self, title: &str, matrix: &CorrelationMatrix) -> RenderResult<()>;

    fn scatter(&mut self, title: &str, points: &ScatterSeries) -> RenderResult<()>;

    fn table(&mut self, title: &str, table: &Table) -> RenderResult<()>;
}

/// Hand one widget's result to the renderer method for its display kind.
pub fn render_widget<R: Renderer + ?Sized>(
    renderer: &mut R,
    widget: &Widget,
    result: &AggregationResult,
) -> RenderResult<()> {
    let title = widget.title;
    match (widget.display, result) {
        (DisplayKind::Metric, AggregationResult::Scalar { value }) => {
            let format = widget.query.metric_format().unwrap_or(MetricFormat::Whole);
            renderer.metric(title, &format.format(*value))
        }
        (DisplayKind::Bar, AggregationResult::Series(s)) => renderer.bar(title, s),
        (DisplayKind::Pie, AggregationResult::Series(s)) => renderer.pie(title, s),
        (DisplayKind::Histogram, AggregationResult::Histogram(h)) => renderer.histogram(title, h),
        (DisplayKind::Box, AggregationResult::Distributions { groups }) => {
            renderer.boxplot(title, groups)
        }
        (DisplayKind::Heatmap, AggregationResult::Matrix(m)) => renderer.heatmap(title, m),
        (DisplayKind::Scatter, AggregationResult::Scatter(s)) => renderer.scatter(title, s),
        (DisplayKind::Table, AggregationResult::Table(t)) => renderer.table(title, t),
        (display, other) => Err(RenderError::ShapeMismatch {
            title,
            display,
            shape: other.shape(),
        }),
    }
}

/// Plain number formatting shared by the renderers: whole numbers without
/// decimals, everything else with two.
pub(crate) fn plain_number(value: f64) -> String {
    let value = zero_unless_visible(value, 2);
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
