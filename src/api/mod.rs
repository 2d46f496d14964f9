//! # API Module
//!
//! HTTP transport for the MCP server, used when started with `--http`.
//!
//! ## Available Endpoints
//! - `GET /api/health` - liveness, network and wallet status
//! - `POST /api/rpc` - JSON-RPC requests, handled like stdio input

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod health;
pub mod rpc;

/// Builds the `/api` router around a shared state.
pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/rpc", post(rpc::rpc_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
