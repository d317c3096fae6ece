//! HTTP API for the dashboard (feature `ui`).

mod server;

pub use server::{router, serve, AppState};
