//! Error taxonomy for tool invocations.
//!
//! Every failure a tool can produce is a [`ToolError`]. Errors stay typed until
//! the dispatch boundary, where they are rendered into the text envelope as
//! `"Error: <message>"`. The [`ToolError::code`] tag is stable and is what
//! callers (and tests) should match on instead of the prose.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("No arguments provided")]
    MissingArguments,
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },
    #[error("Wallet not connected. Please connect wallet first.")]
    NotConnected,
    #[error("Failed to connect wallet: {0}")]
    WalletConnectFailed(String),
    #[error("Failed to get balance: {0}")]
    TokenQuery(String),
    #[error("Failed to get quote: {0}")]
    QuoteFailed(String),
    #[error("Failed to execute swap: {0}")]
    SwapReverted(String),
    #[error("Failed to approve token: {0}")]
    ApprovalFailed(String),
    #[error("{operation} timed out after {}s", .after.as_secs())]
    RpcTimeout {
        operation: &'static str,
        after: Duration,
    },
}

impl ToolError {
    /// Machine-readable tag for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::MissingArguments => "MISSING_ARGUMENTS",
            ToolError::UnknownTool(_) => "UNKNOWN_TOOL",
            ToolError::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            ToolError::NotConnected => "NOT_CONNECTED",
            ToolError::WalletConnectFailed(_) => "WALLET_CONNECT_FAILED",
            ToolError::TokenQuery(_) => "TOKEN_QUERY_ERROR",
            ToolError::QuoteFailed(_) => "QUOTE_FAILED",
            ToolError::SwapReverted(_) => "SWAP_REVERTED",
            ToolError::ApprovalFailed(_) => "APPROVAL_FAILED",
            ToolError::RpcTimeout { .. } => "RPC_TIMEOUT",
        }
    }

    /// Text body sent back to the caller for this failure.
    pub fn to_text(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Renders an `anyhow` chain as a single line, outermost context first.
pub fn cause(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}
