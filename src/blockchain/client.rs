//! Chain access seam.
//!
//! Services never talk to a provider directly; they go through [`ChainClient`]
//! so the tool layer can be exercised against an in-memory chain in tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::{
    providers::{Http, Provider},
    signers::LocalWallet,
    types::{Address, Bytes, TransactionRequest, U256},
};

pub use super::evm_client::EvmClient;
use crate::blockchain::models::TxOutcome;

/// Read and write access to one EVM chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64>;

    /// Native balance in wei.
    async fn native_balance(&self, owner: Address) -> Result<U256>;

    /// Read-only `eth_call` against `to` with raw calldata.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    async fn block_number(&self) -> Result<u64>;

    async fn gas_price(&self) -> Result<U256>;

    /// Signs `tx` with `wallet`, broadcasts it and waits for the receipt.
    async fn send_and_confirm(
        &self,
        wallet: &LocalWallet,
        tx: TransactionRequest,
    ) -> Result<TxOutcome>;
}

/// Create a provider for the given RPC URL
pub fn create_provider(rpc_url: &str) -> Result<Provider<Http>> {
    let parsed =
        url::Url::parse(rpc_url).map_err(|e| anyhow!("Invalid RPC URL '{}': {}", rpc_url, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("Unsupported RPC URL scheme '{}'", parsed.scheme()));
    }
    Provider::<Http>::try_from(rpc_url).map_err(|e| anyhow!("Failed to create provider: {}", e))
}
