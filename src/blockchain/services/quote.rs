// src/blockchain/services/quote.rs

use anyhow::Context;
use ethers::abi::Token;
use ethers::types::U256;
use serde::Deserialize;

use crate::blockchain::{
    abi::{self, SIG_QUOTE_EXACT_INPUT_SINGLE},
    client::ChainClient,
    models::QuoteOutcome,
    network::NetworkProfile,
    services::token::{amount_of, resolve_decimals},
    units::from_base_units,
};
use crate::error::{cause, ToolError};
use crate::utils::{amount_text, opt_fee, parse_address};

/// Pool fee used when none (or zero) is given: the 0.3% tier.
pub const DEFAULT_FEE: u32 = 3000;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuoteArgs {
    pub token_in: String,
    pub token_out: String,
    #[serde(deserialize_with = "amount_text")]
    pub amount_in: String,
    #[serde(default, deserialize_with = "opt_fee")]
    pub fee: Option<u32>,
}

/// Fee tier to route through; zero counts as unset.
pub fn effective_fee(fee: Option<u32>) -> u32 {
    match fee {
        None | Some(0) => DEFAULT_FEE,
        Some(f) => f,
    }
}

/// `3000` becomes `"0.3"`.
pub fn fee_percent(fee: u32) -> String {
    format!("{}", f64::from(fee) / 10_000.0)
}

pub async fn get_quote(
    client: &dyn ChainClient,
    profile: &NetworkProfile,
    args: GetQuoteArgs,
) -> Result<String, ToolError> {
    let token_in = parse_address("get_quote", "tokenIn", &args.token_in)?;
    let token_out = parse_address("get_quote", "tokenOut", &args.token_out)?;
    let fee = effective_fee(args.fee);

    let quote = async {
        let (input, decimals_out) = tokio::try_join!(
            amount_of(client, profile, token_in, &args.amount_in),
            resolve_decimals(client, profile, token_out),
        )?;
        let amount_in = input.to_base_units()?;

        let data = abi::encode_call(
            SIG_QUOTE_EXACT_INPUT_SINGLE,
            vec![
                Token::Address(token_in),
                Token::Address(token_out),
                Token::Uint(U256::from(fee)),
                Token::Uint(amount_in),
                Token::Uint(U256::zero()),
            ],
        );
        let raw = client
            .call(profile.contracts.quoter, data)
            .await
            .context("quoter simulation failed")?;
        let (amount_out, gas_estimate) =
            abi::decode_quote(&raw).context("quoter returned malformed data")?;
        let outcome = QuoteOutcome {
            amount_out,
            gas_estimate,
        };
        let formatted = from_base_units(outcome.amount_out, decimals_out)?;
        anyhow::Ok((formatted, outcome))
    }
    .await
    .map_err(|e| ToolError::QuoteFailed(cause(&e)))?;

    let (amount_out, outcome) = quote;
    let mut text = format!(
        "📊 Swap Quote\n\nInput: {}\nOutput: {}\nFee Tier: {}%",
        args.amount_in.trim(),
        amount_out,
        fee_percent(fee)
    );
    if let Some(gas) = outcome.gas_estimate {
        text.push_str(&format!("\nGas Estimate: {}", gas));
    }
    Ok(text)
}
