// src/blockchain/services/token.rs

use anyhow::{Context, Result};
use ethers::types::{Address, U256};

use crate::blockchain::{
    abi::{self, SIG_DECIMALS, SIG_SYMBOL},
    client::ChainClient,
    network::NetworkProfile,
    units::{AmountSpec, NATIVE_DECIMALS},
};

pub async fn decimals(client: &dyn ChainClient, token: Address) -> Result<u8> {
    let raw = client
        .call(token, abi::encode_call(SIG_DECIMALS, vec![]))
        .await
        .context("decimals() call failed")?;
    abi::decode_u8(&raw).context("decimals() returned malformed data")
}

pub async fn symbol(client: &dyn ChainClient, token: Address) -> Result<String> {
    let raw = client
        .call(token, abi::encode_call(SIG_SYMBOL, vec![]))
        .await
        .context("symbol() call failed")?;
    abi::decode_string(&raw).context("symbol() returned malformed data")
}

pub async fn balance_of(client: &dyn ChainClient, token: Address, owner: Address) -> Result<U256> {
    let raw = client
        .call(token, abi::balance_of_call(owner))
        .await
        .context("balanceOf() call failed")?;
    abi::decode_u256(&raw).context("balanceOf() returned malformed data")
}

/// Decimals used to scale amounts of `token`.
///
/// The wrapped-native token is always 18 and is never queried.
pub async fn resolve_decimals(
    client: &dyn ChainClient,
    profile: &NetworkProfile,
    token: Address,
) -> Result<u8> {
    if profile.is_wrapped_native(&token) {
        return Ok(NATIVE_DECIMALS);
    }
    decimals(client, token).await
}

/// Pairs a human amount of `token` with the decimals it scales by.
pub async fn amount_of(
    client: &dyn ChainClient,
    profile: &NetworkProfile,
    token: Address,
    amount: &str,
) -> Result<AmountSpec> {
    let decimals = resolve_decimals(client, profile, token).await?;
    Ok(AmountSpec::new(amount, decimals))
}
