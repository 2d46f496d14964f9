// src/blockchain/services/swap.rs

use chrono::Utc;
use ethers::signers::Signer;
use ethers::types::{TransactionRequest, U256};
use serde::Deserialize;

use crate::blockchain::{
    abi::{self, SIG_EXACT_INPUT_SINGLE},
    client::ChainClient,
    models::{ExactInputSingleParams, TxStatus},
    network::NetworkProfile,
    services::{quote::effective_fee, token::amount_of},
    session::Session,
    units::UnitError,
};
use crate::error::{cause, ToolError};
use crate::utils::{amount_text, opt_fee, opt_percent, parse_address};

/// Seconds a submitted swap stays valid.
pub const SWAP_DEADLINE_SECS: u64 = 1800;

pub const DEFAULT_SLIPPAGE_PERCENT: f64 = 1.0;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteSwapArgs {
    pub token_in: String,
    pub token_out: String,
    #[serde(deserialize_with = "amount_text")]
    pub amount_in: String,
    #[serde(deserialize_with = "amount_text")]
    pub min_amount_out: String,
    #[serde(default, deserialize_with = "opt_fee")]
    pub fee: Option<u32>,
    /// Reported back only; `min_amount_out` is the enforced floor.
    #[serde(default, deserialize_with = "opt_percent")]
    pub slippage_percent: Option<f64>,
}

fn deadline() -> U256 {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    U256::from(now + SWAP_DEADLINE_SECS)
}

pub async fn execute_swap(
    client: &dyn ChainClient,
    profile: &NetworkProfile,
    session: &Session,
    args: ExecuteSwapArgs,
) -> Result<String, ToolError> {
    let wallet = session.signer()?;
    let token_in = parse_address("execute_swap", "tokenIn", &args.token_in)?;
    let token_out = parse_address("execute_swap", "tokenOut", &args.token_out)?;
    let fee = effective_fee(args.fee);
    let slippage = args.slippage_percent.unwrap_or(DEFAULT_SLIPPAGE_PERCENT);
    let failed = |e: anyhow::Error| ToolError::SwapReverted(cause(&e));

    let (input, floor) = tokio::try_join!(
        amount_of(client, profile, token_in, &args.amount_in),
        amount_of(client, profile, token_out, &args.min_amount_out),
    )
    .map_err(failed)?;
    let unit_failed = |e: UnitError| ToolError::SwapReverted(e.to_string());
    let amount_in = input.to_base_units().map_err(unit_failed)?;
    let min_out = floor.to_base_units().map_err(unit_failed)?;

    let params = ExactInputSingleParams {
        token_in,
        token_out,
        fee,
        recipient: wallet.address(),
        deadline: deadline(),
        amount_in,
        amount_out_minimum: min_out,
        sqrt_price_limit_x96: U256::zero(),
    };
    let mut tx = TransactionRequest::new()
        .to(profile.contracts.swap_router)
        .data(abi::encode_call(SIG_EXACT_INPUT_SINGLE, vec![params.into_token()]));
    if profile.is_wrapped_native(&token_in) {
        tx = tx.value(amount_in);
    }

    tracing::info!(
        "Submitting swap of {} {:?} for at least {} {:?} (fee {})",
        args.amount_in,
        token_in,
        args.min_amount_out,
        token_out,
        fee
    );
    let outcome = client.send_and_confirm(wallet, tx).await.map_err(failed)?;
    match outcome.status {
        TxStatus::Confirmed => {}
        TxStatus::Reverted => {
            return Err(ToolError::SwapReverted(format!(
                "transaction {:?} reverted",
                outcome.hash
            )))
        }
        TxStatus::Dropped => {
            return Err(ToolError::SwapReverted(format!(
                "transaction {:?} was dropped before confirmation",
                outcome.hash
            )))
        }
    }

    Ok(format!(
        "✅ Swap Successful!\n\nTransaction Hash: {:?}\nExplorer: {}\n\nSwapped {} → {} (minimum)\nSlippage Tolerance: {}%",
        outcome.hash,
        profile.tx_url(&outcome.hash),
        args.amount_in.trim(),
        args.min_amount_out.trim(),
        slippage
    ))
}
