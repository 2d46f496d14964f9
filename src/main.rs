// src/main.rs

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uniswap_mcp_server::{
    api::create_router,
    blockchain::client::EvmClient,
    config::Config,
    mcp::stdio,
    AppState,
};

// --- HTTP Server Logic ---
async fn run_http_server(state: AppState) {
    let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("❌ Failed to bind {}: {}", addr, e);
            return;
        }
    };
    info!("🚀 HTTP Server listening on {}", addr);
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("HTTP server stopped: {}", e);
    }
}

// --- MCP Server Logic ---
async fn run_mcp_server(state: AppState) {
    info!("🚀 Starting MCP server on stdin/stdout...");

    let stdin = io::BufReader::new(io::stdin());
    if let Err(e) = stdio::serve(stdin, io::stdout(), &state).await {
        error!("Stdio transport failed: {}", e);
    }

    info!("MCP server shutting down");
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uniswap_mcp_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Failed to load configuration: {:#}", e);
            return;
        }
    };

    let evm_client = match EvmClient::new(&config.network) {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Failed to initialize EVM client: {:#}", e);
            return;
        }
    };
    info!(
        "Serving {} (chain {}) via {}",
        config.network.name,
        config.network.chain_id,
        evm_client.endpoint()
    );

    let app_state = AppState::new(config, Arc::new(evm_client));

    // Stdio is the default transport; HTTP is opt-in
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--http") || env::var("HTTP_MODE").is_ok() {
        run_http_server(app_state).await;
    } else {
        run_mcp_server(app_state).await;
    }
}
