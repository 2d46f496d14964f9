// src/mcp/dispatcher.rs

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{error, info};

use crate::blockchain::{
    client::ChainClient,
    network::NetworkProfile,
    services::{approve, balance, network_info, quote, swap, wallet},
    session::Session,
};
use crate::config::{BalancePolicy, Config};
use crate::error::ToolError;
use crate::mcp::protocol::CallToolResult;
use crate::mcp::tools::ToolName;
use crate::utils::parse_args;

/// Routes tool calls to their handlers and owns the session they share.
///
/// Calls run one at a time; the dispatcher is the only writer of the session.
pub struct ToolDispatcher {
    profile: Arc<NetworkProfile>,
    client: Arc<dyn ChainClient>,
    session: Session,
    balance_policy: BalancePolicy,
    network_info_timeout: Duration,
}

impl ToolDispatcher {
    pub fn new(config: &Config, client: Arc<dyn ChainClient>) -> Self {
        Self {
            profile: Arc::new(config.network.clone()),
            client,
            session: Session::new(),
            balance_policy: config.balance_policy,
            network_info_timeout: config.network_info_timeout,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs a tool and wraps the outcome in the text envelope.
    ///
    /// Failures come back as `"Error: <message>"` text, never as an `Err`.
    pub async fn call_tool(&mut self, name: &str, arguments: Option<&Value>) -> CallToolResult {
        info!("Calling tool: {}", name);
        match self.dispatch(name, arguments).await {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                error!(code = e.code(), "Tool {} failed: {}", name, e);
                CallToolResult::text(e.to_text())
            }
        }
    }

    /// Typed form of [`call_tool`](Self::call_tool).
    pub async fn dispatch(
        &mut self,
        name: &str,
        arguments: Option<&Value>,
    ) -> Result<String, ToolError> {
        let args = match arguments {
            Some(Value::Null) | None => return Err(ToolError::MissingArguments),
            Some(args) => args,
        };
        let tool =
            ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        if tool.needs_session() {
            self.session.signer()?;
        }

        let client = self.client.as_ref();
        let profile = self.profile.as_ref();
        let name = tool.as_str();
        match tool {
            ToolName::ConnectWallet => {
                let args = parse_args(name, args)?;
                let policy = self.balance_policy;
                wallet::connect_wallet(client, profile, &mut self.session, policy, args).await
            }
            ToolName::GetBalance => balance::get_balance(client, parse_args(name, args)?).await,
            ToolName::GetQuote => quote::get_quote(client, profile, parse_args(name, args)?).await,
            ToolName::ExecuteSwap => {
                swap::execute_swap(client, profile, &self.session, parse_args(name, args)?).await
            }
            ToolName::ApproveToken => {
                let args = parse_args(name, args)?;
                approve::approve_token(client, profile, &self.session, args).await
            }
            ToolName::GetNetworkInfo => {
                network_info::get_network_info(client, profile, self.network_info_timeout).await
            }
        }
    }
}
