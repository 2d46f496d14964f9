// src/blockchain/models.rs
use ethers::abi::Token;
use ethers::types::{Address, H256, U256};
use serde::Serialize;

// --- Transaction outcomes ---

/// Terminal state of a submitted transaction once its receipt was awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Confirmed,
    Reverted,
    /// The node forgot the transaction before a receipt showed up.
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOutcome {
    pub hash: H256,
    pub status: TxStatus,
}

impl TxOutcome {
    pub fn is_confirmed(&self) -> bool {
        self.status == TxStatus::Confirmed
    }
}

// --- Router / quoter models ---

/// Result of simulating a single-pool exact-input swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOutcome {
    pub amount_out: U256,
    /// Only reported by QuoterV2 deployments.
    pub gas_estimate: Option<U256>,
}

/// Argument tuple of `SwapRouter.exactInputSingle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactInputSingleParams {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    pub deadline: U256,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U256,
}

impl ExactInputSingleParams {
    pub fn into_token(self) -> Token {
        Token::Tuple(vec![
            Token::Address(self.token_in),
            Token::Address(self.token_out),
            Token::Uint(U256::from(self.fee)),
            Token::Address(self.recipient),
            Token::Uint(self.deadline),
            Token::Uint(self.amount_in),
            Token::Uint(self.amount_out_minimum),
            Token::Uint(self.sqrt_price_limit_x96),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_token_order() {
        let params = ExactInputSingleParams {
            token_in: Address::repeat_byte(1),
            token_out: Address::repeat_byte(2),
            fee: 500,
            recipient: Address::repeat_byte(3),
            deadline: U256::from(1_700_000_000u64),
            amount_in: U256::from(10u64),
            amount_out_minimum: U256::from(9u64),
            sqrt_price_limit_x96: U256::zero(),
        };
        match params.into_token() {
            Token::Tuple(fields) => {
                assert_eq!(fields.len(), 8);
                assert_eq!(fields[2], Token::Uint(U256::from(500u64)));
                assert_eq!(fields[3], Token::Address(Address::repeat_byte(3)));
                assert_eq!(fields[6], Token::Uint(U256::from(9u64)));
            }
            other => panic!("expected tuple, got {:?}", other),
        }
    }
}
