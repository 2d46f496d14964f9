//! JSON-RPC method handling shared by both transports.

mod common;

use common::{profile, MockChainClient};
use serde_json::{json, Value};
use uniswap_mcp_server::{
    config::Config,
    mcp::{handler::handle_mcp_request, protocol::Request},
    AppState,
};

fn state() -> AppState {
    AppState::new(Config::for_network(profile()), MockChainClient::new())
}

fn request(value: Value) -> Request {
    serde_json::from_value(value).unwrap()
}

async fn call(state: &AppState, value: Value) -> Value {
    let response = handle_mcp_request(request(value), state).await.unwrap();
    serde_json::to_value(response).unwrap()
}

#[tokio::test]
async fn test_initialize_echoes_protocol_version() {
    let state = state();
    let body = call(
        &state,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
    )
    .await;
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(body["result"]["serverInfo"]["name"], "uniswap_mcp");
    assert!(body["result"]["capabilities"]["tools"].is_object());

    let body = call(&state, json!({"jsonrpc": "2.0", "id": 2, "method": "initialize"})).await;
    assert_eq!(body["result"]["protocolVersion"], "2025-06-18");
}

#[tokio::test]
async fn test_ping_and_unknown_method() {
    let state = state();
    let body = call(&state, json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})).await;
    assert_eq!(body["result"], json!({}));

    let body = call(&state, json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"})).await;
    assert_eq!(body["error"]["code"], -32601);
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let state = state();
    let req = request(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
    assert!(handle_mcp_request(req, &state).await.is_none());
}

#[tokio::test]
async fn test_tools_call_without_params_is_protocol_error() {
    let state = state();
    let body = call(&state, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call"})).await;
    assert_eq!(body["error"]["code"], -32602);

    let body = call(&state, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {}})).await;
    assert_eq!(body["error"]["code"], -32602);
}

#[tokio::test]
async fn test_tools_call_without_arguments_is_in_band() {
    let state = state();
    let body = call(
        &state,
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": {"name": "get_balance"}}),
    )
    .await;
    assert!(body.get("error").is_none());
    assert_eq!(body["result"]["content"][0]["text"], "Error: No arguments provided");
}

#[tokio::test]
async fn test_direct_method_alias() {
    let state = state();
    let body = call(
        &state,
        json!({"jsonrpc": "2.0", "id": 7, "method": "get_balance", "params": {"address": "0x1111111111111111111111111111111111111111", "tokenAddress": "ETH"}}),
    )
    .await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["result"]["content"][0]["text"], "ETH Balance: 0.0 ETH");

    let body = call(&state, json!({"jsonrpc": "2.0", "id": 8, "method": "get_network_info"})).await;
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Unichain Sepolia"));
}
