// src/blockchain/evm_client.rs

use crate::blockchain::{
    client::{create_provider, ChainClient},
    models::{TxOutcome, TxStatus},
    network::NetworkProfile,
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ethers::{
    middleware::SignerMiddleware,
    signers::{LocalWallet, Signer},
    types::{transaction::eip2718::TypedTransaction, Address, Bytes, TransactionRequest, U256, U64},
};
use ethers_providers::{Http, Middleware, Provider};
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// JSON-RPC backed client for a single EVM network.
///
/// The endpoint is picked once, at construction, and kept for the lifetime of
/// the client. There is no failover between calls.
#[derive(Clone)]
pub struct EvmClient {
    provider: Arc<Provider<Http>>,
    endpoint: String,
    chain_id: u64,
}

impl EvmClient {
    /// Create a client for `profile`, using the first endpoint that parses.
    pub fn new(profile: &NetworkProfile) -> Result<Self> {
        for url in profile.rpc_endpoints() {
            match create_provider(url) {
                Ok(provider) => {
                    tracing::info!(network = %profile.name, endpoint = %url, "Using RPC endpoint");
                    return Ok(Self {
                        provider: Arc::new(provider.interval(POLL_INTERVAL)),
                        endpoint: url.to_string(),
                        chain_id: profile.chain_id,
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping RPC endpoint {} for {}: {}", url, profile.name, e);
                }
            }
        }
        Err(anyhow!("No usable RPC endpoint configured for {}", profile.name))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChainClient for EvmClient {
    async fn chain_id(&self) -> Result<u64> {
        let id = self
            .provider
            .get_chainid()
            .await
            .context("eth_chainId failed")?;
        if id > U256::from(u64::MAX) {
            return Err(anyhow!("chain id {} out of range", id));
        }
        Ok(id.as_u64())
    }

    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.provider
            .get_balance(owner, None)
            .await
            .context("eth_getBalance failed")
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new().to(to).data(data).into();
        self.provider
            .call(&tx, None)
            .await
            .with_context(|| format!("eth_call to {:?} failed", to))
    }

    async fn block_number(&self) -> Result<u64> {
        let n = self
            .provider
            .get_block_number()
            .await
            .context("eth_blockNumber failed")?;
        Ok(n.as_u64())
    }

    async fn gas_price(&self) -> Result<U256> {
        self.provider
            .get_gas_price()
            .await
            .context("eth_gasPrice failed")
    }

    async fn send_and_confirm(
        &self,
        wallet: &LocalWallet,
        tx: TransactionRequest,
    ) -> Result<TxOutcome> {
        let signer = wallet.clone().with_chain_id(self.chain_id);
        let middleware = SignerMiddleware::new(self.provider.as_ref().clone(), signer);

        let pending = middleware
            .send_transaction(tx, None)
            .await
            .map_err(|e| anyhow!("{}", e))?;
        let hash = pending.tx_hash();
        tracing::info!("Transaction {:?} submitted, waiting for receipt", hash);

        let receipt = pending.await.map_err(|e| anyhow!("{}", e))?;
        let status = match receipt {
            None => TxStatus::Dropped,
            Some(r) if r.status == Some(U64::zero()) => TxStatus::Reverted,
            Some(_) => TxStatus::Confirmed,
        };
        tracing::info!("Transaction {:?} finished: {:?}", hash, status);
        Ok(TxOutcome { hash, status })
    }
}
