// src/lib.rs

use std::sync::Arc;
use tokio::sync::Mutex;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod mcp;
pub mod utils;

use blockchain::client::ChainClient;
use config::Config;
use mcp::dispatcher::ToolDispatcher;

/// Application state shared by both transports.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// The single dispatcher; the mutex serializes tool calls.
    pub dispatcher: Arc<Mutex<ToolDispatcher>>,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn ChainClient>) -> Self {
        let dispatcher = ToolDispatcher::new(&config, client);
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(Mutex::new(dispatcher)),
        }
    }
}
