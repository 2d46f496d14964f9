// src/blockchain/services/approve.rs

use ethers::types::{TransactionRequest, U256};
use serde::Deserialize;

use crate::blockchain::{
    abi,
    client::ChainClient,
    models::TxStatus,
    network::NetworkProfile,
    services::token::amount_of,
    session::Session,
};
use crate::error::{cause, ToolError};
use crate::utils::{display_address, opt_amount_text, parse_address};

/// Allowance granted for the `"max"` keyword: `2^256 - 1`.
///
/// The router may then move any amount of the token on the wallet's behalf
/// until the allowance is reset.
pub const UNLIMITED_APPROVAL: U256 = U256::MAX;

pub const UNLIMITED_APPROVAL_KEYWORD: &str = "max";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveTokenArgs {
    pub token_address: String,
    #[serde(default, deserialize_with = "opt_amount_text")]
    pub amount: Option<String>,
}

pub async fn approve_token(
    client: &dyn ChainClient,
    profile: &NetworkProfile,
    session: &Session,
    args: ApproveTokenArgs,
) -> Result<String, ToolError> {
    let wallet = session.signer()?;
    let token = parse_address("approve_token", "tokenAddress", &args.token_address)?;
    let spender = profile.contracts.swap_router;
    let amount_text = args
        .amount
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| UNLIMITED_APPROVAL_KEYWORD.to_string());

    let (amount, label) = if amount_text == UNLIMITED_APPROVAL_KEYWORD {
        (UNLIMITED_APPROVAL, "Unlimited".to_string())
    } else {
        let amount = amount_of(client, profile, token, &amount_text)
            .await
            .map_err(|e| ToolError::ApprovalFailed(cause(&e)))?
            .to_base_units()
            .map_err(|e| ToolError::ApprovalFailed(e.to_string()))?;
        (amount, amount_text.trim().to_string())
    };

    let tx = TransactionRequest::new()
        .to(token)
        .data(abi::approve_call(spender, amount));
    tracing::info!("Approving {} of {:?} for router {:?}", label, token, spender);
    let outcome = client
        .send_and_confirm(wallet, tx)
        .await
        .map_err(|e| ToolError::ApprovalFailed(cause(&e)))?;
    if !outcome.is_confirmed() {
        return Err(ToolError::ApprovalFailed(format!(
            "transaction {:?} {}",
            outcome.hash,
            match outcome.status {
                TxStatus::Reverted => "reverted",
                _ => "was dropped before confirmation",
            }
        )));
    }

    Ok(format!(
        "✅ Approval Successful!\n\nToken: {}\nSpender: {}\nAmount: {}\nTransaction: {}",
        display_address(&token),
        display_address(&spender),
        label,
        profile.tx_url(&outcome.hash)
    ))
}
