//! Tool registry.
//!
//! The six tools and their JSON-schema input descriptors are fixed at compile
//! time. `tools/list` serializes [`registry`] as-is.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ConnectWallet,
    GetBalance,
    GetQuote,
    ExecuteSwap,
    ApproveToken,
    GetNetworkInfo,
}

impl ToolName {
    pub const ALL: [ToolName; 6] = [
        ToolName::ConnectWallet,
        ToolName::GetBalance,
        ToolName::GetQuote,
        ToolName::ExecuteSwap,
        ToolName::ApproveToken,
        ToolName::GetNetworkInfo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::ConnectWallet => "connect_wallet",
            ToolName::GetBalance => "get_balance",
            ToolName::GetQuote => "get_quote",
            ToolName::ExecuteSwap => "execute_swap",
            ToolName::ApproveToken => "approve_token",
            ToolName::GetNetworkInfo => "get_network_info",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Tools that sign and submit a transaction with the session wallet.
    pub fn needs_session(self) -> bool {
        matches!(self, ToolName::ExecuteSwap | ToolName::ApproveToken)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Names listed under the schema's `required` key.
    pub fn required(&self) -> Vec<&str> {
        self.input_schema["required"]
            .as_array()
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

fn descriptor(
    tool: ToolName,
    description: &'static str,
    properties: Value,
    required: &[&str],
) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.as_str(),
        description,
        input_schema: json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    }
}

pub fn registry() -> Vec<ToolDescriptor> {
    vec![
        descriptor(
            ToolName::ConnectWallet,
            "Connect a wallet using a private key. The wallet signs all later swaps and approvals.",
            json!({
                "privateKey": {"type": "string", "description": "Hex private key, with or without 0x prefix"}
            }),
            &["privateKey"],
        ),
        descriptor(
            ToolName::GetBalance,
            "Get the native ETH or ERC20 token balance of an address.",
            json!({
                "address": {"type": "string", "description": "Wallet address to check"},
                "tokenAddress": {"type": "string", "description": "ERC20 token address, or 'ETH' for the native balance"}
            }),
            &["address", "tokenAddress"],
        ),
        descriptor(
            ToolName::GetQuote,
            "Quote a single-pool exact-input swap without sending a transaction.",
            json!({
                "tokenIn": {"type": "string", "description": "Address of the token to sell"},
                "tokenOut": {"type": "string", "description": "Address of the token to buy"},
                "amountIn": {"type": "string", "description": "Amount of tokenIn in decimal units (e.g. '1.5')"},
                "fee": {"type": "number", "description": "Pool fee tier: 500 (0.05%), 3000 (0.3%) or 10000 (1%)", "default": 3000}
            }),
            &["tokenIn", "tokenOut", "amountIn"],
        ),
        descriptor(
            ToolName::ExecuteSwap,
            "Execute a single-pool exact-input swap from the connected wallet.",
            json!({
                "tokenIn": {"type": "string", "description": "Address of the token to sell"},
                "tokenOut": {"type": "string", "description": "Address of the token to buy"},
                "amountIn": {"type": "string", "description": "Amount of tokenIn in decimal units"},
                "minAmountOut": {"type": "string", "description": "Minimum amount of tokenOut to accept, in decimal units"},
                "fee": {"type": "number", "description": "Pool fee tier", "default": 3000},
                "slippagePercent": {"type": "number", "description": "Slippage tolerance in percent, reported with the result", "default": 1}
            }),
            &["tokenIn", "tokenOut", "amountIn", "minAmountOut"],
        ),
        descriptor(
            ToolName::ApproveToken,
            "Approve the swap router to spend a token from the connected wallet.",
            json!({
                "tokenAddress": {"type": "string", "description": "Address of the token to approve"},
                "amount": {"type": "string", "description": "Amount in decimal units, or 'max' for an unlimited allowance", "default": "max"}
            }),
            &["tokenAddress"],
        ),
        descriptor(
            ToolName::GetNetworkInfo,
            "Show the network, its contracts, the latest block and the current gas price.",
            json!({}),
            &[],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for tool in ToolName::ALL {
            assert_eq!(ToolName::parse(tool.as_str()), Some(tool));
        }
        assert_eq!(ToolName::parse("Get_Balance"), None);
    }

    #[test]
    fn test_registry_matches_names() {
        let names: Vec<&str> = registry().iter().map(|d| d.name).collect();
        let expected: Vec<&str> = ToolName::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_schema_serializes_camel_case() {
        let value = serde_json::to_value(&registry()[0]).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert_eq!(value["inputSchema"]["required"][0], "privateKey");
    }
}
