// src/blockchain/services/balance.rs

use serde::Deserialize;

use crate::blockchain::{
    client::ChainClient,
    network::NATIVE_MARKER,
    services::token,
    units::{format_ether, from_base_units},
};
use crate::error::{cause, ToolError};
use crate::utils::parse_address;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBalanceArgs {
    pub address: String,
    /// ERC20 address, or `ETH` for the native balance.
    pub token_address: String,
}

pub async fn get_balance(
    client: &dyn ChainClient,
    args: GetBalanceArgs,
) -> Result<String, ToolError> {
    let owner = parse_address("get_balance", "address", &args.address)?;

    if args.token_address.trim().eq_ignore_ascii_case(NATIVE_MARKER) {
        let wei = client
            .native_balance(owner)
            .await
            .map_err(|e| ToolError::TokenQuery(cause(&e)))?;
        return Ok(format!("ETH Balance: {} ETH", format_ether(wei)));
    }

    let token_address = parse_address("get_balance", "tokenAddress", &args.token_address)?;
    let (raw, decimals, symbol) = tokio::try_join!(
        token::balance_of(client, token_address, owner),
        token::decimals(client, token_address),
        token::symbol(client, token_address),
    )
    .map_err(|e| ToolError::TokenQuery(cause(&e)))?;

    let amount = from_base_units(raw, decimals).map_err(|e| ToolError::TokenQuery(e.to_string()))?;
    Ok(format!("{} Balance: {} {}", symbol, amount, symbol))
}
