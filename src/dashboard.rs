//! Dashboard session: the active page plus the active filter selection.
//!
//! Changing either recomputes only what the current page needs:
//!
//! ```text
//! Dataset ──filter──► FilteredView ──page widgets──► PageReport ──► Renderer
//! ```
//!
//! Queries of other pages are never evaluated until their page is selected.

use serde::Serialize;

use crate::data::{DataError, Dataset};
use crate::filter::{filter, FilterSelection, FilteredView};
use crate::page::{PageId, Widget};
use crate::query::AggregationResult;
use crate::render::{render_widget, RenderError, Renderer};

/// Errors surfaced to the user interface layer.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] DataError),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// A widget paired with its computed input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetReport {
    pub widget: Widget,
    pub result: AggregationResult,
}

/// Everything one page shows for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    pub page: PageId,
    /// Rows in the filtered view.
    pub data_points: usize,
    pub widgets: Vec<WidgetReport>,
}

impl PageReport {
    /// Compute every widget of `page` over `view`.
    pub fn compute(page: PageId, view: &FilteredView<'_>) -> Self {
        let widgets = page
            .widgets()
            .iter()
            .map(|widget| WidgetReport {
                widget: *widget,
                result: widget.query.run(view),
            })
            .collect();

        tracing::debug!(page = %page, rows = view.len(), "computed page");
        Self {
            page,
            data_points: view.len(),
            widgets,
        }
    }

    /// Result for the widget with the given title.
    pub fn result(&self, title: &str) -> Option<&AggregationResult> {
        self.widgets
            .iter()
            .find(|w| w.widget.title == title)
            .map(|w| &w.result)
    }

    /// Drive a renderer through the page.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> DashboardResult<()> {
        renderer.begin_page(self.page)?;
        for report in &self.widgets {
            render_widget(renderer, &report.widget, &report.result)?;
        }
        renderer.end_page(self.data_points)?;
        Ok(())
    }
}

/// Interactive session over a loaded dataset.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    dataset: &'a Dataset,
    page: PageId,
    selection: FilterSelection,
}

impl<'a> Dashboard<'a> {
    /// Start on `page` with every Product type and Location selected.
    pub fn new(dataset: &'a Dataset, page: PageId) -> Self {
        Self {
            dataset,
            page,
            selection: FilterSelection::all(dataset),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn select_page(&mut self, page: PageId) {
        self.page = page;
    }

    /// Switch page by name, failing with `UnknownPage`.
    pub fn select_page_by_name(&mut self, name: &str) -> DashboardResult<()> {
        self.page = name.parse()?;
        Ok(())
    }

    pub fn set_filter(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    /// Filter options offered to the user: (Product types, Locations).
    pub fn filter_options(&self) -> (Vec<&'a str>, Vec<&'a str>) {
        (self.dataset.product_types(), self.dataset.locations())
    }

    /// The current filtered view.
    pub fn view(&self) -> FilteredView<'a> {
        filter(self.dataset, &self.selection)
    }

    /// Compute the current page.
    pub fn report(&self) -> PageReport {
        PageReport::compute(self.page, &self.view())
    }

    /// Compute and render the current page.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> DashboardResult<PageReport> {
        let report = self.report();
        report.render(renderer)?;
        Ok(report)
    }
}
