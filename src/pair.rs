//! Parsing of `tokenA_tokenB` pair identifiers.

use ethers::{types::Address, utils::to_checksum};
use regex::Regex;
use std::{str::FromStr, sync::LazyLock};

use crate::errors::{AppError, Result};

static PAIR_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]{40}_0x[0-9a-fA-F]{40}$").expect("pair regex is valid")
});

/// Two validated token addresses, in the order the caller gave them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairId {
    pub token_a: Address,
    pub token_b: Address,
}

impl PairId {
    pub fn parse(raw: &str) -> Result<Self> {
        if !PAIR_FORMAT.is_match(raw) {
            return Err(AppError::InvalidPair);
        }
        let (a, b) = raw.split_once('_').ok_or(AppError::InvalidPair)?;
        Ok(Self {
            token_a: parse_address(a)?,
            token_b: parse_address(b)?,
        })
    }
}

impl FromStr for PairId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse a `0x`-prefixed hex address. Mixed-case input must carry a valid
/// EIP-55 checksum; single-case input is accepted as is.
pub fn parse_address(raw: &str) -> Result<Address> {
    let address =
        Address::from_str(raw).map_err(|_| AppError::InvalidAddress(raw.to_string()))?;

    let hex = raw.trim_start_matches("0x");
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address, None) != raw {
        return Err(AppError::InvalidAddress(raw.to_string()));
    }

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    // WETH and USDC, checksummed.
    const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    #[test]
    fn parses_checksummed_pair() {
        let pair = PairId::parse(&format!("{WETH}_{USDC}")).unwrap();
        assert_eq!(pair.token_a, WETH.parse::<Address>().unwrap());
        assert_eq!(pair.token_b, USDC.parse::<Address>().unwrap());
    }

    #[test]
    fn accepts_single_case_addresses() {
        let raw = format!("{}_0x{}", WETH.to_lowercase(), USDC[2..].to_uppercase());
        let pair: PairId = raw.parse().unwrap();
        assert_eq!(pair.token_a, WETH.parse::<Address>().unwrap());
        assert_eq!(pair.token_b, USDC.parse::<Address>().unwrap());
    }

    #[test]
    fn rejects_malformed_identifiers() {
        let cases = vec![
            "not-an-address".to_string(),
            String::new(),
            WETH.to_string(),
            format!("{WETH}-{USDC}"),
            format!("{WETH}_{USDC}_"),
            format!("{WETH}_{}", &USDC[..41]),
            format!("{}_{USDC}", WETH.replace("0x", "0X")),
            format!("{WETH}_0xZZb86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
        ];
        for raw in &cases {
            assert!(
                matches!(PairId::parse(raw), Err(AppError::InvalidPair)),
                "expected InvalidPair for {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_checksum() {
        // Flip the case of one checksummed letter.
        let bad = WETH.replacen("C02aaA", "C02aaa", 1);
        let err = PairId::parse(&format!("{bad}_{USDC}")).unwrap_err();
        assert!(matches!(err, AppError::InvalidAddress(ref a) if *a == bad));
        assert!(err.is_client_error());
    }
}
