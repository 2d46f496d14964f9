// src/config.rs

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::blockchain::network::NetworkProfile;

pub const DEFAULT_NETWORK: &str = "unichain-sepolia";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_NETWORK_INFO_TIMEOUT: Duration = Duration::from_secs(15);

/// How `connect_wallet` treats a failed balance read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalancePolicy {
    /// The connect fails with the balance error.
    Strict,
    /// The read is bounded by `timeout`; failure reports a zero balance.
    Lenient { timeout: Duration },
}

// A struct to hold all configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub port: u16,

    /// Network the server is pinned to, with RPC endpoints already validated.
    pub network: NetworkProfile,

    // Tool behavior
    pub balance_policy: BalancePolicy,
    pub network_info_timeout: Duration,
}

impl Config {
    /// Defaults for `network`: lenient connects and the standard timeouts.
    pub fn for_network(network: NetworkProfile) -> Self {
        Self {
            port: DEFAULT_PORT,
            network,
            balance_policy: BalancePolicy::Lenient {
                timeout: DEFAULT_CONNECT_TIMEOUT,
            },
            network_info_timeout: DEFAULT_NETWORK_INFO_TIMEOUT,
        }
    }

    /// Bound used for balance reads at connect time, if any.
    pub fn connect_timeout(&self) -> Option<Duration> {
        match self.balance_policy {
            BalancePolicy::Strict => None,
            BalancePolicy::Lenient { timeout } => Some(timeout),
        }
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut network = match var("NETWORK_PROFILE") {
            Some(json) => serde_json::from_str::<NetworkProfile>(&json)
                .context("NETWORK_PROFILE must be a JSON network profile")?,
            None => NetworkProfile::preset(
                &var("NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.to_string()),
            )?,
        };

        if let Some(url) = var("RPC_URL") {
            network.rpc_url = url;
        }
        if let Some(json) = var("FALLBACK_RPC_URLS") {
            network.fallback_rpc_urls = serde_json::from_str(&json)
                .context("FALLBACK_RPC_URLS must be a JSON array of URLs")?;
        }
        validate_endpoints(&mut network)?;

        let secs = |key: &str, default: Duration| -> Result<Duration> {
            match var(key) {
                Some(v) => v
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{} must be a whole number of seconds", key)),
                None => Ok(default),
            }
        };
        let connect_timeout = secs("CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT)?;
        let network_info_timeout = secs("NETWORK_INFO_TIMEOUT_SECS", DEFAULT_NETWORK_INFO_TIMEOUT)?;

        let balance_policy = match var("BALANCE_POLICY").map(|v| v.to_lowercase()).as_deref() {
            None | Some("lenient") => BalancePolicy::Lenient {
                timeout: connect_timeout,
            },
            Some("strict") => BalancePolicy::Strict,
            Some(other) => {
                return Err(anyhow!(
                    "BALANCE_POLICY must be 'lenient' or 'strict', got '{}'",
                    other
                ))
            }
        };

        Ok(Config {
            port: match var("PORT") {
                Some(p) => p.parse().context("PORT must be a valid number")?,
                None => DEFAULT_PORT,
            },
            network,
            balance_policy,
            network_info_timeout,
        })
    }
}

/// Drops unparsable RPC URLs, promoting the first valid one to primary.
fn validate_endpoints(network: &mut NetworkProfile) -> Result<()> {
    let mut valid = Vec::new();
    for url in network.rpc_endpoints() {
        match url::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                valid.push(url.to_string())
            }
            Ok(parsed) => {
                tracing::warn!("Ignoring RPC URL {} with scheme '{}'", url, parsed.scheme())
            }
            Err(e) => tracing::warn!("Ignoring invalid RPC URL {}: {}", url, e),
        }
    }
    let mut valid = valid.into_iter();
    network.rpc_url = valid
        .next()
        .ok_or_else(|| anyhow!("No valid RPC URL configured for {}", network.name))?;
    network.fallback_rpc_urls = valid.collect();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.network.chain_id, 1301);
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.network_info_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("NETWORK", "ethereum-sepolia"),
            ("RPC_URL", "http://127.0.0.1:8545"),
            ("FALLBACK_RPC_URLS", r#"["not a url", "https://rpc.sepolia.org"]"#),
            ("BALANCE_POLICY", "Strict"),
            ("NETWORK_INFO_TIMEOUT_SECS", "3"),
            ("PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(config.network.chain_id, 11155111);
        assert_eq!(config.network.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.network.fallback_rpc_urls, vec!["https://rpc.sepolia.org".to_string()]);
        assert_eq!(config.balance_policy, BalancePolicy::Strict);
        assert_eq!(config.connect_timeout(), None);
        assert_eq!(config.network_info_timeout, Duration::from_secs(3));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_primary_promotes_fallback() {
        let config = load(&[("NETWORK", "sepolia"), ("RPC_URL", "::bad::")]).unwrap();
        assert_eq!(
            config.network.rpc_url,
            "https://sepolia.infura.io/v3/9aa3d95b3bc440fa88ea12eaa4456161"
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("NETWORK", "mainnet")]).is_err());
        assert!(load(&[("BALANCE_POLICY", "sometimes")]).is_err());
        assert!(load(&[("CONNECT_TIMEOUT_SECS", "ten")]).is_err());
        assert!(load(&[("RPC_URL", "nope"), ("FALLBACK_RPC_URLS", "[]")]).is_err());
    }
}
