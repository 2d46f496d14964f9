//! # MCP Handler Module
//!
//! JSON-RPC entry point shared by the stdio and HTTP transports.
//!
//! ## Methods
//! - `initialize` - server info and the tools capability
//! - `ping` - liveness check
//! - `tools/list` - the six tool descriptors
//! - `tools/call` - run a tool, always answered with a text envelope
//!
//! A method named after a tool (e.g. `get_balance`) is treated as a
//! `tools/call` for that tool with `params` as its arguments.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::{
    mcp::{
        protocol::{error_codes, CallToolParams, Request, Response},
        tools::{registry, ToolName},
    },
    AppState,
};

pub const SERVER_NAME: &str = "uniswap_mcp";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-06-18";

pub async fn handle_mcp_request(req: Request, state: &AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id, json!({})),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, state).await,
        // Direct calls such as {"method": "get_balance", "params": {...}}
        method if ToolName::parse(method).is_some() => {
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": method,
                    "arguments": req.params.clone().unwrap_or_else(|| json!({}))
                })),
            };
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request by dispatching it to the named tool.
async fn handle_tool_call(req: Request, state: &AppState) -> Response {
    let params = match req.params {
        Some(p) => p,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };
    let params: CallToolParams = match serde_json::from_value(params) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                format!("Invalid tools/call params: {}", e),
            )
        }
    };

    let result = {
        let mut dispatcher = state.dispatcher.lock().await;
        dispatcher.call_tool(&params.name, params.arguments.as_ref()).await
    };

    match serde_json::to_value(result) {
        Ok(value) => Response::success(req.id, value),
        Err(e) => {
            error!("Failed to serialize tool result: {}", e);
            Response::error(
                req.id,
                error_codes::INTERNAL_ERROR,
                "Failed to serialize tool result".into(),
            )
        }
    }
}

/// Handles the 'initialize' request.
fn handle_initialize(req: &Request) -> Response {
    let protocol_version = req
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    let server_info = json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({ "tools": { "listChanged": false } });
    let instructions =
        "Uniswap V3 tools: connect a wallet, check balances, quote and execute swaps, approve tokens and inspect the network.";

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": protocol_version,
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

/// Handles the 'tools/list' request.
///
/// Served without taking the dispatcher lock.
fn handle_tools_list(req: &Request) -> Response {
    Response::success(req.id.clone(), json!({ "tools": registry() }))
}
