// src/blockchain/network.rs

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};

/// Token argument that selects the chain's native asset instead of an ERC20.
pub const NATIVE_MARKER: &str = "ETH";

/// Fixed contract addresses a profile swaps and quotes against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub swap_router: Address,
    pub quoter: Address,
    pub wrapped_native: Address,
    pub reference_stable: Address,
}

/// Static identity of the chain the server talks to.
///
/// Built once at startup from a preset or from `NETWORK_PROFILE`, then shared
/// read-only for the lifetime of the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    #[serde(default)]
    pub fallback_rpc_urls: Vec<String>,
    pub explorer_url: String,
    pub contracts: ContractAddresses,
}

struct Preset {
    name: &'static str,
    chain_id: u64,
    rpc_url: &'static str,
    fallback_rpc_urls: &'static [&'static str],
    explorer_url: &'static str,
    swap_router: &'static str,
    quoter: &'static str,
    wrapped_native: &'static str,
    reference_stable: &'static str,
}

const UNICHAIN_SEPOLIA: Preset = Preset {
    name: "Unichain Sepolia",
    chain_id: 1301,
    rpc_url: "https://sepolia.rpc.unichain.org",
    fallback_rpc_urls: &[],
    explorer_url: "https://sepolia.uniscan.xyz",
    swap_router: "0x94cC0AaC535CCDB3C01d6787D6413C739ae12bc4",
    quoter: "0xc694a4cf10e2e4f77b49c35c5e6ea1b0fde6f6e8",
    wrapped_native: "0x4200000000000000000000000000000000000006",
    reference_stable: "0xEea1BafFF6A3842ca8C9E86a82E7b26Fc81c8ECa",
};

const ETHEREUM_SEPOLIA: Preset = Preset {
    name: "Ethereum Sepolia",
    chain_id: 11155111,
    rpc_url: "https://sepolia.infura.io/v3/9aa3d95b3bc440fa88ea12eaa4456161",
    fallback_rpc_urls: &[
        "https://sepolia.infura.io/v3/9aa3d95b3bc440fa88ea12eaa4456161",
        "https://rpc.sepolia.org",
        "https://sepolia.gateway.tenderly.co",
    ],
    explorer_url: "https://sepolia.etherscan.io",
    swap_router: "0xE592427A0AEce92De3Edee1F18E0157C05861564",
    quoter: "0xb27308f9F90D607463bb33eA1BeBb41C27CE5AB6",
    wrapped_native: "0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14",
    reference_stable: "0x1c7D4B196Cb0C7B01d743Fbc6116a25637902743",
};

/// Names accepted by [`NetworkProfile::preset`].
pub const PRESET_NAMES: [&str; 2] = ["unichain-sepolia", "ethereum-sepolia"];

fn parse_address(label: &str, value: &str) -> Result<Address> {
    Address::from_str(value).with_context(|| format!("invalid {} address '{}'", label, value))
}

impl NetworkProfile {
    fn from_preset(preset: &Preset) -> Result<Self> {
        Ok(Self {
            name: preset.name.to_string(),
            chain_id: preset.chain_id,
            rpc_url: preset.rpc_url.to_string(),
            fallback_rpc_urls: preset.fallback_rpc_urls.iter().map(|s| s.to_string()).collect(),
            explorer_url: preset.explorer_url.to_string(),
            contracts: ContractAddresses {
                swap_router: parse_address("swap router", preset.swap_router)?,
                quoter: parse_address("quoter", preset.quoter)?,
                wrapped_native: parse_address("wrapped native", preset.wrapped_native)?,
                reference_stable: parse_address("reference stable", preset.reference_stable)?,
            },
        })
    }

    pub fn unichain_sepolia() -> Result<Self> {
        Self::from_preset(&UNICHAIN_SEPOLIA)
    }

    pub fn ethereum_sepolia() -> Result<Self> {
        Self::from_preset(&ETHEREUM_SEPOLIA)
    }

    /// Resolves a preset by name, chain id or common alias.
    pub fn preset(name: &str) -> Result<Self> {
        let mut key = name.trim().to_lowercase();
        key = key.replace([' ', '_'], "-");
        match key.as_str() {
            "unichain-sepolia" | "unichain" | "1301" => Self::unichain_sepolia(),
            "ethereum-sepolia" | "sepolia" | "eth-sepolia" | "11155111" => Self::ethereum_sepolia(),
            _ => Err(anyhow!(
                "unknown network '{}'. Available: {}",
                name,
                PRESET_NAMES.join(", ")
            )),
        }
    }

    /// True when `token` is this chain's wrapped-native contract.
    ///
    /// Addresses compare by bytes, so checksum casing never matters.
    pub fn is_wrapped_native(&self, token: &Address) -> bool {
        *token == self.contracts.wrapped_native
    }

    /// Primary endpoint first, then fallbacks, without duplicates.
    pub fn rpc_endpoints(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(1 + self.fallback_rpc_urls.len());
        for url in std::iter::once(&self.rpc_url).chain(self.fallback_rpc_urls.iter()) {
            let url = url.trim();
            if !url.is_empty() && !out.contains(&url) {
                out.push(url);
            }
        }
        out
    }

    pub fn tx_url(&self, hash: &H256) -> String {
        format!("{}/tx/{:?}", self.explorer_url.trim_end_matches('/'), hash)
    }
}
