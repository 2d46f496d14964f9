// src/blockchain/services/wallet.rs

use ethers::types::U256;
use ethers_signers::{LocalWallet, Signer};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::blockchain::{
    client::ChainClient, network::NetworkProfile, session::Session, units::format_ether,
};
use crate::config::BalancePolicy;
use crate::error::{cause, ToolError};
use crate::utils::display_address;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectWalletArgs {
    pub private_key: SecretString,
}

/// Builds a signer from a 32-byte hex key, with or without `0x`.
pub fn parse_private_key(key: &SecretString) -> Result<LocalWallet, ToolError> {
    let exposed = key.expose_secret().trim();
    let hex_part = exposed.strip_prefix("0x").unwrap_or(exposed);
    if hex_part.len() != 64 {
        return Err(ToolError::WalletConnectFailed(
            "private key must be 32 bytes (64 hex characters)".to_string(),
        ));
    }
    let bytes = Zeroizing::new(hex::decode(hex_part).map_err(|_| {
        ToolError::WalletConnectFailed("private key is not valid hex".to_string())
    })?);
    LocalWallet::from_bytes(&bytes)
        .map_err(|e| ToolError::WalletConnectFailed(format!("invalid private key: {}", e)))
}

/// `connect_wallet`: derive the address, read its balance and make it the session signer.
pub async fn connect_wallet(
    client: &dyn ChainClient,
    profile: &NetworkProfile,
    session: &mut Session,
    policy: BalancePolicy,
    args: ConnectWalletArgs,
) -> Result<String, ToolError> {
    let wallet = parse_private_key(&args.private_key)?;
    let address = wallet.address();
    tracing::info!("Connecting wallet {:?}", address);

    let (balance, degraded) = match policy {
        BalancePolicy::Strict => match client.native_balance(address).await {
            Ok(balance) => (balance, None),
            Err(e) => return Err(ToolError::WalletConnectFailed(cause(&e))),
        },
        BalancePolicy::Lenient { timeout } => {
            match tokio::time::timeout(timeout, client.native_balance(address)).await {
                Ok(Ok(balance)) => (balance, None),
                Ok(Err(e)) => {
                    tracing::warn!("Balance check for {:?} failed: {:#}", address, e);
                    (U256::zero(), Some(cause(&e)))
                }
                Err(_) => {
                    let err = ToolError::RpcTimeout {
                        operation: "Balance check",
                        after: timeout,
                    };
                    tracing::warn!("{}", err);
                    (U256::zero(), Some(err.to_string()))
                }
            }
        }
    };

    session.connect(wallet);

    let mut text = format!(
        "✅ Wallet connected successfully!\n\nAddress: {}\nBalance: {} ETH\nNetwork: {}",
        display_address(&address),
        format_ether(balance),
        profile.name
    );
    if let Some(reason) = degraded {
        text.push_str(&format!(
            "\n\nNote: Balance check may be limited due to RPC connectivity issues ({})",
            reason
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d";

    #[test]
    fn test_parse_private_key_accepts_prefix() {
        let bare = parse_private_key(&SecretString::new(KEY.to_string())).unwrap();
        let prefixed = parse_private_key(&SecretString::new(format!("0x{}", KEY))).unwrap();
        assert_eq!(bare.address(), prefixed.address());
        assert_eq!(
            display_address(&bare.address()),
            "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1"
        );
    }

    #[test]
    fn test_parse_private_key_rejects_garbage() {
        let bad_keys = vec![String::new(), "0x1234".to_string(), "zz".repeat(32), "00".repeat(32)];
        for bad in bad_keys {
            let err = parse_private_key(&SecretString::new(bad)).unwrap_err();
            assert_eq!(err.code(), "WALLET_CONNECT_FAILED");
        }
    }
}
