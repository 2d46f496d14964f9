//! Utility functions for the Uniswap MCP server

use std::str::FromStr;

use ethers::types::Address;
use ethers::utils::to_checksum;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{from_value, Value};

use crate::error::ToolError;

/// Deserializes a tool's argument object into its typed form.
pub fn parse_args<T: DeserializeOwned>(tool: &'static str, args: &Value) -> Result<T, ToolError> {
    from_value(args.clone()).map_err(|e| ToolError::InvalidArguments {
        tool,
        reason: e.to_string(),
    })
}

/// Parses a hex address; casing is irrelevant.
pub fn parse_address(tool: &'static str, field: &str, value: &str) -> Result<Address, ToolError> {
    Address::from_str(value.trim()).map_err(|_| ToolError::InvalidArguments {
        tool,
        reason: format!("'{}' is not a valid address: {}", field, value),
    })
}

/// EIP-55 form of an address.
pub fn display_address(address: &Address) -> String {
    to_checksum(address, None)
}

/// `1234567` becomes `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

/// Accepts `"1.5"` as well as `1.5` for amount fields.
pub fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n.to_string()),
        NumberOrText::Text(s) => Ok(s),
    }
}

/// Optional variant of [`amount_text`].
pub fn opt_amount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n.to_string())),
        Some(NumberOrText::Text(s)) => Ok(Some(s)),
    }
}

/// Fee tiers arrive as `3000` or `"3000"`.
pub fn opt_fee<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid fee tier {}", n))),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid fee tier '{}'", s))),
    }
}

/// Slippage percentages arrive as `0.5` or `"0.5"`.
pub fn opt_percent<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid percentage {}", n))),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid percentage '{}'", s))),
    }
}
