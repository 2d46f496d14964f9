//! Conversion between human decimal amounts and integer base units.
//!
//! Every amount that reaches a contract call goes through [`to_base_units`];
//! every raw amount shown to a caller goes through [`from_base_units`].

use ethers::types::U256;
use ethers::utils::{format_units, parse_units, ParseUnits};
use thiserror::Error;

/// Decimals of the native asset and of its wrapped token.
pub const NATIVE_DECIMALS: u8 = 18;

/// Decimals of gwei relative to wei.
pub const GWEI_DECIMALS: u8 = 9;

const MAX_DIGITS: usize = 77;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UnitError {
    #[error("invalid amount '{0}': expected a non-negative decimal number")]
    Malformed(String),
    #[error("invalid amount '{amount}': more than {decimals} decimal places")]
    TooPrecise { amount: String, decimals: u8 },
    #[error("cannot convert '{amount}' with {decimals} decimals: {reason}")]
    Conversion {
        amount: String,
        decimals: u8,
        reason: String,
    },
}

/// A decimal amount paired with the decimals it must be scaled by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountSpec {
    pub amount: String,
    pub decimals: u8,
}

impl AmountSpec {
    pub fn new(amount: impl Into<String>, decimals: u8) -> Self {
        Self {
            amount: amount.into(),
            decimals,
        }
    }

    pub fn to_base_units(&self) -> Result<U256, UnitError> {
        to_base_units(&self.amount, self.decimals)
    }
}

/// Scales a decimal string such as `"1.5"` into base units.
///
/// Fraction digits beyond `decimals` are accepted only when they are zeros.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, UnitError> {
    let trimmed = amount.trim();
    let malformed = || UnitError::Malformed(amount.to_string());

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !all_digits(int_part)
        || !all_digits(frac_part)
    {
        return Err(malformed());
    }

    let mut frac = frac_part.trim_end_matches('0');
    if frac.len() > usize::from(decimals) {
        return Err(UnitError::TooPrecise {
            amount: amount.to_string(),
            decimals,
        });
    }
    if frac.is_empty() {
        frac = "0";
    }
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    // 10^77 is the largest power of ten below 2^256.
    if int_part.len() + usize::from(decimals) > MAX_DIGITS {
        return Err(UnitError::Conversion {
            amount: amount.to_string(),
            decimals,
            reason: "amount exceeds uint256".to_string(),
        });
    }
    let normalized = format!("{}.{}", int_part, frac);

    match parse_units(normalized.as_str(), u32::from(decimals)) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(malformed()),
        Err(e) => Err(UnitError::Conversion {
            amount: amount.to_string(),
            decimals,
            reason: e.to_string(),
        }),
    }
}

/// Renders base units as a decimal string, e.g. `1500000` with 6 decimals is `"1.5"`.
///
/// Whole amounts keep a single fractional zero (`"2.0"`).
pub fn from_base_units(value: U256, decimals: u8) -> Result<String, UnitError> {
    let formatted = format_units(value, u32::from(decimals)).map_err(|e| UnitError::Conversion {
        amount: value.to_string(),
        decimals,
        reason: e.to_string(),
    })?;
    Ok(tidy_decimal(&formatted))
}

/// Native balances are always 18 decimals, which `format_units` supports.
pub fn format_ether(wei: U256) -> String {
    from_base_units(wei, NATIVE_DECIMALS).unwrap_or_else(|_| wei.to_string())
}

fn tidy_decimal(raw: &str) -> String {
    match raw.split_once('.') {
        Some((int_part, frac)) => {
            let frac = frac.trim_end_matches('0');
            let int_part = if int_part.is_empty() { "0" } else { int_part };
            if frac.is_empty() {
                format!("{}.0", int_part)
            } else {
                format!("{}.{}", int_part, frac)
            }
        }
        None => format!("{}.0", raw),
    }
}
