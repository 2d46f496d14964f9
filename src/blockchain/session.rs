// src/blockchain/session.rs

use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;

use crate::error::ToolError;

/// The wallet the server currently signs with.
///
/// At most one wallet is active. A later connect replaces it, and nothing is
/// persisted across restarts.
#[derive(Debug, Default)]
pub struct Session {
    wallet: Option<LocalWallet>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, wallet: LocalWallet) {
        if let Some(previous) = self.wallet.as_ref() {
            tracing::info!("Replacing connected wallet {:?}", previous.address());
        }
        self.wallet = Some(wallet);
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn address(&self) -> Option<Address> {
        self.wallet.as_ref().map(|w| w.address())
    }

    /// The active signer, or [`ToolError::NotConnected`].
    pub fn signer(&self) -> Result<&LocalWallet, ToolError> {
        self.wallet.as_ref().ok_or(ToolError::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_has_no_signer() {
        let session = Session::new();
        assert!(!session.is_connected());
        assert!(session.address().is_none());
        assert!(matches!(session.signer(), Err(ToolError::NotConnected)));
    }

    #[test]
    fn test_connect_replaces_wallet() {
        let mut session = Session::new();
        let first: LocalWallet = "4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d"
            .parse()
            .unwrap();
        let second: LocalWallet = "6cbed15c793ce57650b9877cf6fa156fbef513c4e6134f022a85b1ffdd59b2a1"
            .parse()
            .unwrap();
        let second_address = second.address();

        session.connect(first);
        session.connect(second);
        assert_eq!(session.address(), Some(second_address));
        assert_eq!(session.signer().unwrap().address(), second_address);
    }
}
