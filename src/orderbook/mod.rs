//! Synthetic order book derived from a constant-product pool.
//!
//! The pool's two reserves are walked in equal increments and every step is
//! priced with the `x * y = k` swap formula (0.3% fee on the input side).
//! Nothing here performs I/O; reserves are supplied by [`crate::dex`].

pub mod book;
pub mod calc;

pub use book::{Level, OrderBook};
pub use calc::{DEFAULT_SEGMENTS, SwapQuote, compute_bids, compute_order_book, swap_quote};
