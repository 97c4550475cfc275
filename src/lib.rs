//! Approximate order books for Uniswap V2 style pairs.
//!
//! Reserves are read from chain by [`dex`], turned into discrete bid/ask
//! levels by [`orderbook`] and served over HTTP by [`server`].

pub mod config;
pub mod dex;
pub mod errors;
pub mod orderbook;
pub mod pair;
pub mod server;
pub mod utils;
