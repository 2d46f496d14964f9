//! Line-oriented stdio transport.

mod common;

use common::{profile, MockChainClient};
use serde_json::Value;
use uniswap_mcp_server::{
    config::Config,
    mcp::stdio::{handle_line, serve},
    AppState,
};

fn state() -> AppState {
    AppState::new(Config::for_network(profile()), MockChainClient::new())
}

#[tokio::test]
async fn test_bad_line_is_parse_error() {
    let line = handle_line("{not json", &state()).await.unwrap();
    let body: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(body["jsonrpc"], "2.0");
    assert!(body["id"].is_null());
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["error"]["message"].as_str().unwrap().starts_with("Parse error:"));
}

#[tokio::test]
async fn test_blank_lines_and_notifications_write_nothing() {
    let state = state();
    assert!(handle_line("   ", &state).await.is_none());
    assert!(handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#, &state)
        .await
        .is_none());
}

#[tokio::test]
async fn test_serve_answers_each_line_in_order() {
    let input = concat!(
        "garbage\n",
        "\n",
        "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":8,\"method\":\"tools/list\"}\n",
    );
    let mut output = Vec::new();
    serve(input.as_bytes(), &mut output, &state()).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["error"]["code"], -32700);
    assert_eq!(lines[1]["id"], 7);
    assert!(lines[1]["result"].is_object());
    assert_eq!(lines[2]["id"], 8);
    assert_eq!(lines[2]["result"]["tools"].as_array().unwrap().len(), 6);
    assert!(text.ends_with('\n'));
}
