use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

/// Liveness plus the configured network.
///
/// `wallet_connected` is `null` while a tool call holds the dispatcher.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let profile = &state.config.network;
    let wallet_connected = state
        .dispatcher
        .try_lock()
        .map(|dispatcher| dispatcher.session().is_connected())
        .ok();
    Json(serde_json::json!({
        "status": "ok",
        "network": profile.name,
        "chain_id": profile.chain_id,
        "wallet_connected": wallet_connected,
    }))
}
