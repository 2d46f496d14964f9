//! Scripted in-memory chain shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::abi::{encode, Token};
use ethers::signers::LocalWallet;
use ethers::types::{Address, Bytes, TransactionRequest, H256, U256};
use uniswap_mcp_server::{
    blockchain::{
        abi::selector,
        client::ChainClient,
        models::{TxOutcome, TxStatus},
        network::NetworkProfile,
    },
    config::{BalancePolicy, Config},
    mcp::dispatcher::ToolDispatcher,
};

pub const TEST_KEY: &str = "0x4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d";
pub const TEST_ADDRESS: &str = "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1";

#[derive(Clone)]
pub enum Behavior<T> {
    Ok(T),
    Fail(String),
    Hang,
}

pub struct MockChainClient {
    responses: Mutex<HashMap<(Address, [u8; 4]), Result<Bytes, String>>>,
    calls: Mutex<Vec<(Address, [u8; 4])>>,
    native: Mutex<Behavior<U256>>,
    network: Mutex<Behavior<(u64, U256)>>,
    send: Mutex<Behavior<TxStatus>>,
    sent: Mutex<Vec<TransactionRequest>>,
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            native: Mutex::new(Behavior::Ok(U256::zero())),
            network: Mutex::new(Behavior::Ok((1, U256::one()))),
            send: Mutex::new(Behavior::Ok(TxStatus::Confirmed)),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl MockChainClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_native(&self, behavior: Behavior<U256>) {
        *self.native.lock().unwrap() = behavior;
    }

    pub fn set_network(&self, behavior: Behavior<(u64, U256)>) {
        *self.network.lock().unwrap() = behavior;
    }

    pub fn set_tx_status(&self, status: TxStatus) {
        *self.send.lock().unwrap() = Behavior::Ok(status);
    }

    /// Makes every submission fail with `reason`, as a node rejecting the
    /// transaction at estimation would.
    pub fn fail_send(&self, reason: &str) {
        *self.send.lock().unwrap() = Behavior::Fail(reason.to_string());
    }

    pub fn respond(&self, to: Address, sig: &str, tokens: Vec<Token>) {
        self.responses
            .lock()
            .unwrap()
            .insert((to, selector(sig)), Ok(Bytes::from(encode(&tokens))));
    }

    pub fn revert(&self, to: Address, sig: &str, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert((to, selector(sig)), Err(reason.to_string()));
    }

    /// Number of `eth_call`s made with the selector of `sig`, to any contract.
    pub fn calls_to(&self, sig: &str) -> usize {
        let sel = selector(sig);
        self.calls.lock().unwrap().iter().filter(|(_, s)| *s == sel).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn chain_id(&self) -> Result<u64> {
        Ok(1301)
    }

    async fn native_balance(&self, _owner: Address) -> Result<U256> {
        let behavior = self.native.lock().unwrap().clone();
        match behavior {
            Behavior::Ok(v) => Ok(v),
            Behavior::Fail(msg) => Err(anyhow!(msg)),
            Behavior::Hang => std::future::pending().await,
        }
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        if data.len() < 4 {
            return Err(anyhow!("calldata too short"));
        }
        let mut sel = [0u8; 4];
        sel.copy_from_slice(&data[..4]);
        self.calls.lock().unwrap().push((to, sel));
        match self.responses.lock().unwrap().get(&(to, sel)) {
            Some(Ok(bytes)) => Ok(bytes.clone()),
            Some(Err(reason)) => Err(anyhow!("execution reverted: {}", reason)),
            None => Err(anyhow!("no response scripted for {:?} 0x{}", to, hex::encode(sel))),
        }
    }

    async fn block_number(&self) -> Result<u64> {
        let behavior = self.network.lock().unwrap().clone();
        match behavior {
            Behavior::Ok((block, _)) => Ok(block),
            Behavior::Fail(msg) => Err(anyhow!(msg)),
            Behavior::Hang => std::future::pending().await,
        }
    }

    async fn gas_price(&self) -> Result<U256> {
        let behavior = self.network.lock().unwrap().clone();
        match behavior {
            Behavior::Ok((_, gas)) => Ok(gas),
            Behavior::Fail(msg) => Err(anyhow!(msg)),
            Behavior::Hang => std::future::pending().await,
        }
    }

    async fn send_and_confirm(
        &self,
        _wallet: &LocalWallet,
        tx: TransactionRequest,
    ) -> Result<TxOutcome> {
        self.sent.lock().unwrap().push(tx);
        let behavior = self.send.lock().unwrap().clone();
        match behavior {
            Behavior::Ok(status) => Ok(TxOutcome {
                hash: H256::repeat_byte(0xab),
                status,
            }),
            Behavior::Fail(msg) => Err(anyhow!(msg)),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

pub fn profile() -> NetworkProfile {
    NetworkProfile::unichain_sepolia().unwrap()
}

pub fn dispatcher_with(client: Arc<MockChainClient>, policy: BalancePolicy) -> ToolDispatcher {
    let mut config = Config::for_network(profile());
    config.balance_policy = policy;
    ToolDispatcher::new(&config, client)
}

pub fn dispatcher(client: Arc<MockChainClient>) -> ToolDispatcher {
    let config = Config::for_network(profile());
    ToolDispatcher::new(&config, client)
}
