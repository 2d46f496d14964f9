//! Re-verifies that a private key works against the configured network.
//!
//! Usage: `wallet_check [PRIVATE_KEY]`, falling back to the `PRIVATE_KEY`
//! environment variable. RPC failures are printed and do not abort the check.

use std::env;

use ethers::signers::Signer;
use secrecy::SecretString;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uniswap_mcp_server::{
    blockchain::{
        client::{ChainClient, EvmClient},
        services::wallet::parse_private_key,
        units::format_ether,
    },
    config::{Config, DEFAULT_CONNECT_TIMEOUT},
    utils::display_address,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uniswap_mcp_server=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Failed to load configuration: {:#}", e);
            return;
        }
    };

    let key = match env::args().nth(1).or_else(|| env::var("PRIVATE_KEY").ok()) {
        Some(k) => SecretString::new(k),
        None => {
            eprintln!("Usage: wallet_check <private-key>  (or set PRIVATE_KEY)");
            return;
        }
    };
    let wallet = match parse_private_key(&key) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("❌ {}", e);
            return;
        }
    };

    println!("Testing wallet connection on {}...\n", config.network.name);
    println!("✅ Wallet created successfully!");
    println!("Address: {}", display_address(&wallet.address()));

    let client = match EvmClient::new(&config.network) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to initialize EVM client: {:#}", e);
            return;
        }
    };

    let timeout = config.connect_timeout().unwrap_or(DEFAULT_CONNECT_TIMEOUT);
    match tokio::time::timeout(timeout, client.native_balance(wallet.address())).await {
        Ok(Ok(wei)) => println!("Balance: {} ETH", format_ether(wei)),
        Ok(Err(e)) => println!("⚠️ Balance check failed (RPC issue): {:#}", e),
        Err(_) => println!(
            "⚠️ Balance check failed (RPC issue): timed out after {}s",
            timeout.as_secs()
        ),
    }

    match tokio::time::timeout(timeout, client.chain_id()).await {
        Ok(Ok(id)) if id == config.network.chain_id => {
            println!("Network: {} (Chain ID: {})", config.network.name, id)
        }
        Ok(Ok(id)) => println!(
            "⚠️ Endpoint {} reports chain {}, expected {}",
            client.endpoint(),
            id,
            config.network.chain_id
        ),
        Ok(Err(e)) => println!("⚠️ Network info failed (RPC issue): {:#}", e),
        Err(_) => println!(
            "⚠️ Network info failed (RPC issue): timed out after {}s",
            timeout.as_secs()
        ),
    }
}
