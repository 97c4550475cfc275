//! Reserve lookup for Uniswap V2 style pairs.

use async_trait::async_trait;
use ethers::types::Address;

use crate::errors::Result;

pub mod client;
pub mod state;

pub use client::UniswapV2Reserves;
pub use state::{Reserves, scale_raw_amount};

/// Anything that can report the current reserves of a token pair.
#[async_trait]
pub trait ReserveSource: Send + Sync {
    /// Reserves of `token_a` and `token_b`, in that order.
    async fn fetch_reserves(&self, token_a: Address, token_b: Address) -> Result<Reserves>;
}
