// src/blockchain/abi.rs

use anyhow::{anyhow, Result};
use ethers_core::abi::{decode, encode, ParamType, Token};
use ethers_core::types::{Address, Bytes, U256};
use ethers_core::utils::keccak256;

pub const SIG_DECIMALS: &str = "decimals()";
pub const SIG_SYMBOL: &str = "symbol()";
pub const SIG_BALANCE_OF: &str = "balanceOf(address)";
pub const SIG_APPROVE: &str = "approve(address,uint256)";
pub const SIG_QUOTE_EXACT_INPUT_SINGLE: &str =
    "quoteExactInputSingle(address,address,uint24,uint256,uint160)";
pub const SIG_EXACT_INPUT_SINGLE: &str =
    "exactInputSingle((address,address,uint24,address,uint256,uint256,uint256,uint160))";

pub fn selector(sig: &str) -> [u8; 4] {
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&keccak256(sig.as_bytes())[0..4]);
    sel
}

pub fn encode_call(sig: &str, tokens: Vec<Token>) -> Bytes {
    let mut out = selector(sig).to_vec();
    let mut tail = encode(&tokens);
    out.append(&mut tail);
    Bytes::from(out)
}

pub fn decode_u256(raw: &Bytes) -> Result<U256> {
    match decode(&[ParamType::Uint(256)], raw)?.first() {
        Some(Token::Uint(n)) => Ok(*n),
        _ => Err(anyhow!("expected a uint256 return value")),
    }
}

pub fn decode_u8(raw: &Bytes) -> Result<u8> {
    let n = decode_u256(raw)?;
    if n > U256::from(u8::MAX) {
        return Err(anyhow!("value {} does not fit in uint8", n));
    }
    Ok(n.low_u32() as u8)
}

/// Decodes an ABI `string`, falling back to a zero-padded `bytes32` as some
/// older tokens return for `symbol()`.
pub fn decode_string(raw: &Bytes) -> Result<String> {
    if let Ok(tokens) = decode(&[ParamType::String], raw) {
        if let Some(Token::String(s)) = tokens.first() {
            return Ok(s.clone());
        }
    }
    if let Ok(tokens) = decode(&[ParamType::FixedBytes(32)], raw) {
        if let Some(Token::FixedBytes(b)) = tokens.first() {
            let trimmed: Vec<u8> = b.iter().copied().take_while(|c| *c != 0u8).collect();
            return String::from_utf8(trimmed).map_err(|e| anyhow!("bytes32 is not utf-8: {}", e));
        }
    }
    Err(anyhow!("expected a string return value"))
}

/// Amount out and, for QuoterV2 deployments, the gas estimate.
///
/// QuoterV2 returns `(uint256 amountOut, uint160 sqrtPriceX96After,
/// uint32 initializedTicksCrossed, uint256 gasEstimate)`; the first-generation quoter
/// returns a bare `uint256`.
pub fn decode_quote(raw: &Bytes) -> Result<(U256, Option<U256>)> {
    let v2 = [
        ParamType::Uint(256),
        ParamType::Uint(160),
        ParamType::Uint(32),
        ParamType::Uint(256),
    ];
    if raw.len() >= 128 {
        if let Ok(tokens) = decode(&v2, raw) {
            if let (Some(Token::Uint(amount_out)), Some(Token::Uint(gas))) =
                (tokens.first(), tokens.get(3))
            {
                return Ok((*amount_out, Some(*gas)));
            }
        }
    }
    Ok((decode_u256(raw)?, None))
}

pub fn balance_of_call(owner: Address) -> Bytes {
    encode_call(SIG_BALANCE_OF, vec![Token::Address(owner)])
}

pub fn approve_call(spender: Address, amount: U256) -> Bytes {
    encode_call(SIG_APPROVE, vec![Token::Address(spender), Token::Uint(amount)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(selector(SIG_DECIMALS)), "313ce567");
        assert_eq!(hex::encode(selector(SIG_SYMBOL)), "95d89b41");
        assert_eq!(hex::encode(selector(SIG_BALANCE_OF)), "70a08231");
        assert_eq!(hex::encode(selector(SIG_APPROVE)), "095ea7b3");
        assert_eq!(hex::encode(selector(SIG_EXACT_INPUT_SINGLE)), "414bf389");
        assert_eq!(hex::encode(selector(SIG_QUOTE_EXACT_INPUT_SINGLE)), "f7729d43");
    }

    #[test]
    fn test_decode_string_and_bytes32() {
        let abi_string = Bytes::from(encode(&[Token::String("USDC".into())]));
        assert_eq!(decode_string(&abi_string).unwrap(), "USDC");

        let mut word = [0u8; 32];
        word[..3].copy_from_slice(b"MKR");
        let bytes32 = Bytes::from(encode(&[Token::FixedBytes(word.to_vec())]));
        assert_eq!(decode_string(&bytes32).unwrap(), "MKR");
    }

    #[test]
    fn test_decode_u8_bounds() {
        let six = Bytes::from(encode(&[Token::Uint(U256::from(6u64))]));
        assert_eq!(decode_u8(&six).unwrap(), 6);
        let big = Bytes::from(encode(&[Token::Uint(U256::from(300u64))]));
        assert!(decode_u8(&big).is_err());
        assert!(decode_u8(&Bytes::new()).is_err());
    }

    #[test]
    fn test_decode_quote_shapes() {
        let v2 = Bytes::from(encode(&[
            Token::Uint(U256::from(1234u64)),
            Token::Uint(U256::from(1u64)),
            Token::Uint(U256::from(2u64)),
            Token::Uint(U256::from(90_000u64)),
        ]));
        assert_eq!(
            decode_quote(&v2).unwrap(),
            (U256::from(1234u64), Some(U256::from(90_000u64)))
        );

        let v1 = Bytes::from(encode(&[Token::Uint(U256::from(77u64))]));
        assert_eq!(decode_quote(&v1).unwrap(), (U256::from(77u64), None));
    }

    #[test]
    fn test_approve_call_layout() {
        let spender = Address::repeat_byte(0x11);
        let data = approve_call(spender, U256::MAX);
        assert_eq!(&data[..4], &selector(SIG_APPROVE));
        let tokens = decode(&[ParamType::Address, ParamType::Uint(256)], &data[4..]).unwrap();
        assert_eq!(tokens[0], Token::Address(spender));
        assert_eq!(tokens[1], Token::Uint(U256::MAX));
    }
}
