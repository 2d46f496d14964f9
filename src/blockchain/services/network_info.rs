// src/blockchain/services/network_info.rs

use std::time::Duration;

use crate::blockchain::{
    client::ChainClient,
    network::NetworkProfile,
    units::{from_base_units, GWEI_DECIMALS},
};
use crate::error::{cause, ToolError};
use crate::utils::{display_address, group_thousands};

const UNAVAILABLE: &str = "N/A (data unavailable)";

/// Live block height and gas price, or the reason they could not be read.
async fn live_data(
    client: &dyn ChainClient,
    timeout: Duration,
) -> Result<(String, String), String> {
    let reads = async { tokio::try_join!(client.block_number(), client.gas_price()) };
    match tokio::time::timeout(timeout, reads).await {
        Ok(Ok((block, gas_price))) => {
            let gwei = from_base_units(gas_price, GWEI_DECIMALS).map_err(|e| e.to_string())?;
            Ok((group_thousands(block), format!("{} gwei", gwei)))
        }
        Ok(Err(e)) => Err(cause(&e)),
        Err(_) => Err(ToolError::RpcTimeout {
            operation: "Network info",
            after: timeout,
        }
        .to_string()),
    }
}

/// `get_network_info`. Never fails: RPC trouble is reported inline.
pub async fn get_network_info(
    client: &dyn ChainClient,
    profile: &NetworkProfile,
    timeout: Duration,
) -> Result<String, ToolError> {
    let (block, gas, degraded) = match live_data(client, timeout).await {
        Ok((block, gas)) => (block, gas, None),
        Err(reason) => {
            tracing::warn!("Network info degraded: {}", reason);
            (UNAVAILABLE.to_string(), UNAVAILABLE.to_string(), Some(reason))
        }
    };

    let contracts = &profile.contracts;
    let mut text = format!(
        "🌐 Network Information\n\nNetwork: {}\nChain ID: {}\nRPC: {}\nExplorer: {}\n\nCurrent Block: {}\nGas Price: {}\n\n📝 Key Contracts:\n• SwapRouter: {}\n• Quoter: {}\n• WETH9: {}\n• USDC: {}",
        profile.name,
        profile.chain_id,
        profile.rpc_url,
        profile.explorer_url,
        block,
        gas,
        display_address(&contracts.swap_router),
        display_address(&contracts.quoter),
        display_address(&contracts.wrapped_native),
        display_address(&contracts.reference_stable),
    );
    if let Some(reason) = degraded {
        text.push_str(&format!(
            "\n\n⚠️ Data unavailable: {}\nNote: RPC connectivity may be limited. Some features may not work properly.",
            reason
        ));
    }
    Ok(text)
}
