//! Axum web server for the dashboard.
//!
//! Serves page renderings as JSON. Filters travel as repeated query
//! parameters, one value each, matched exactly: a missing parameter selects
//! every value, a parameter given only as empty (`?location=`) selects nothing.
//!
//! ```text
//! GET /api/pages
//! GET /api/filters
//! GET /api/pages/{page}?product_type=haircare&product_type=skincare&location=Mumbai
//! ```

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::dashboard::{DashboardError, PageReport};
use crate::data::Dataset;
use crate::filter::{filter, FilterSelection};
use crate::page::{PageId, Widget};
use crate::render::JsonRenderer;

/// Application state shared across handlers.
pub struct AppState {
    pub dataset: &'static Dataset,
}

/// Build the axum router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/pages", get(list_pages))
        .route("/api/filters", get(list_filters))
        .route("/api/pages/{page}", get(render_page))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(dataset: &'static Dataset, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(Arc::new(AppState { dataset }));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, rows = dataset.len(), "dashboard server listening");
    axum::serve(listener, app).await
}

#[derive(Debug, Serialize)]
struct PageInfo {
    page: PageId,
    title: &'static str,
    widgets: &'static [Widget],
}

async fn list_pages() -> Json<Vec<PageInfo>> {
    Json(
        PageId::ALL
            .into_iter()
            .map(|page| PageInfo {
                page,
                title: page.title(),
                widgets: page.widgets(),
            })
            .collect(),
    )
}

#[derive(Debug, Serialize)]
struct FilterOptions {
    product_types: Vec<&'static str>,
    locations: Vec<&'static str>,
}

async fn list_filters(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(FilterOptions {
        product_types: state.dataset.product_types(),
        locations: state.dataset.locations(),
    })
}

/// Query parameter selecting Product types.
pub const PRODUCT_TYPE_PARAM: &str = "product_type";
/// Query parameter selecting Locations.
pub const LOCATION_PARAM: &str = "location";

/// Filter values collected from the query string, `None` when the parameter
/// never appears.
#[derive(Debug, Default)]
struct FilterParams {
    product_types: Option<Vec<String>>,
    locations: Option<Vec<String>>,
}

impl FilterParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                PRODUCT_TYPE_PARAM => &mut params.product_types,
                LOCATION_PARAM => &mut params.locations,
                _ => continue,
            };
            let values = slot.get_or_insert_with(Vec::new);
            if !value.is_empty() {
                values.push(value);
            }
        }
        params
    }

    fn selection(self, dataset: &Dataset) -> FilterSelection {
        let mut selection = FilterSelection::all(dataset);
        if let Some(values) = self.product_types {
            selection = selection.with_product_types(values);
        }
        if let Some(values) = self.locations {
            selection = selection.with_locations(values);
        }
        selection
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, err: impl ToString) -> Response {
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

async fn render_page(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let page: PageId = match page.parse() {
        Ok(p) => p,
        Err(e @ DashboardError::UnknownPage(_)) => {
            return error_response(StatusCode::NOT_FOUND, e);
        }
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    };

    let selection = FilterParams::from_pairs(pairs).selection(state.dataset);
    let view = filter(state.dataset, &selection);
    let report = PageReport::compute(page, &view);

    let mut renderer = JsonRenderer::new();
    match report.render(&mut renderer) {
        Ok(()) => Json(renderer.into_value()).into_response(),
        Err(e) => {
            tracing::error!(error = %e, page = %page, "failed to render page");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}
