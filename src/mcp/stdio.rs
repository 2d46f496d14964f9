//! Newline-delimited JSON-RPC over a byte stream.
//!
//! One request per line in, one response per line out. Notifications get no
//! line back; unparsable lines get a `-32700` error with a null id.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info};

use crate::{
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request, Response},
    },
    AppState,
};

/// Answers a single input line, or `None` when nothing should be written.
pub async fn handle_line(line: &str, state: &AppState) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    debug!("Received: {}", line);

    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_mcp_request(request, state).await?,
        Err(parse_error) => {
            error!("JSON parse error: {}", parse_error);
            Response::error(
                serde_json::Value::Null,
                error_codes::PARSE_ERROR,
                format!("Parse error: {}", parse_error),
            )
        }
    };

    match serde_json::to_string(&response) {
        Ok(json) => Some(json),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            None
        }
    }
}

/// Serves requests from `reader` until EOF, flushing after every response.
pub async fn serve<R, W>(reader: R, mut writer: W, state: &AppState) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(json) = handle_line(&line, state).await {
            debug!("Sending: {}", json);
            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
    info!("EOF received, shutting down MCP server");
    Ok(())
}
