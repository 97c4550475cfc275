use bigdecimal::BigDecimal;
use ethers::types::U256;
use num_bigint::BigInt;
use std::str::FromStr;

use crate::errors::Result;

/// Immutable snapshot of a two-token pool, ordered as the caller requested
/// the tokens (not the pool's internal token0/token1 order).
#[derive(Clone, Debug, PartialEq)]
pub struct Reserves {
    pub reserve_a: BigDecimal,
    pub reserve_b: BigDecimal,
}

impl Reserves {
    pub fn new(reserve_a: BigDecimal, reserve_b: BigDecimal) -> Self {
        Self {
            reserve_a,
            reserve_b,
        }
    }

    /// Build from the pool's token0/token1 balances. `a_is_token0` tells
    /// whether the requested token A is the pool's token0.
    pub fn from_pool_order(reserve0: BigDecimal, reserve1: BigDecimal, a_is_token0: bool) -> Self {
        if a_is_token0 {
            Self::new(reserve0, reserve1)
        } else {
            Self::new(reserve1, reserve0)
        }
    }
}

/// Convert a raw on-chain integer amount into token units, e.g.
/// `1_500_000` with 6 decimals becomes `1.5`.
pub fn scale_raw_amount(raw: U256, decimals: u8) -> Result<BigDecimal> {
    let digits = BigInt::from_str(&raw.to_string())
        .map_err(|e| crate::errors::AppError::Other(format!("invalid raw amount {raw}: {e}")))?;
    Ok(BigDecimal::new(digits, i64::from(decimals)))
}
