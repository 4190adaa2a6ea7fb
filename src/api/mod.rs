//! Stateless REST API over the sizing engine.
//!
//! Endpoints:
//! - `POST /size/off-grid`, `/size/hybrid`, `/size/grid-tie`, `/size/water`
//! - `GET /panels` lists the panel catalog

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::catalog::PanelCatalog;
use crate::sizing::Heuristics;

pub use types::{
    BatterySystemRequest, ErrorResponse, GridTieRequest, PanelEntry, SizingResponse, WaterRequest,
};

/// Read-only state shared across all request handlers.
pub struct AppState {
    /// Panels that requests may select by model.
    pub catalog: PanelCatalog,
    /// Defaults for requests that carry no `heuristics` section.
    pub heuristics: Heuristics,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: PanelCatalog::builtin(),
            heuristics: Heuristics::default(),
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/size/off-grid", post(handlers::size_off_grid))
        .route("/size/hybrid", post(handlers::size_hybrid))
        .route("/size/grid-tie", post(handlers::size_grid_tie))
        .route("/size/water", post(handlers::size_water))
        .route("/panels", get(handlers::list_panels))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
