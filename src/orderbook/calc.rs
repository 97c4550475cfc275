use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{One, Zero};
use std::num::NonZeroUsize;

use crate::orderbook::book::{Level, OrderBook};

/// Segment count used when the caller does not pick one.
pub const DEFAULT_SEGMENTS: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Decimal places kept after every division (half-up).
pub const DIVISION_SCALE: i64 = 20;

/// Share of the input that reaches the curve after the 0.3% LP fee.
fn fee_multiplier() -> BigDecimal {
    BigDecimal::new(997.into(), 3)
}

/// All divisions go through here so repeated segment math rounds identically.
fn div(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    (numerator / denominator).with_scale_round(DIVISION_SCALE, RoundingMode::HalfUp)
}

/// Result of pushing `amount_in` through the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapQuote {
    pub amount_out: BigDecimal,
    /// `reserve_in + amount_in`, fee included.
    pub reserves_in_after: BigDecimal,
    pub reserves_out_after: BigDecimal,
}

/// Quote a constant-product swap with the fee taken off the input.
///
/// # Arguments
/// * `amount_in` - Nominal input amount
/// * `reserve_in` - Pool balance of the input token
/// * `reserve_out` - Pool balance of the output token
///
/// The caller guarantees `reserve_in + amount_in > 0`. The recorded
/// `reserves_in_after` grows by the full `amount_in` even though only
/// 99.7% of it enters the pricing formula.
pub fn swap_quote(
    amount_in: &BigDecimal,
    reserve_in: &BigDecimal,
    reserve_out: &BigDecimal,
) -> SwapQuote {
    let effective_in = amount_in * fee_multiplier();
    let remaining = div(&(reserve_out * reserve_in), &(reserve_in + effective_in));
    let amount_out = reserve_out - remaining;

    SwapQuote {
        reserves_in_after: reserve_in + amount_in,
        reserves_out_after: reserve_out - &amount_out,
        amount_out,
    }
}

/// Walk the curve from the base side in `segments` equal increments.
///
/// Level `i` carries the cumulative size `increment * i` and the average
/// price `amount_out / amount_in`. The starting point of every segment is
/// recomputed from the untouched reserves rather than chained from the
/// previous level, so this is a fixed formula per level and not a
/// sequential fill simulation.
pub fn compute_bids(
    base_reserves: &BigDecimal,
    quote_reserves: &BigDecimal,
    segments: NonZeroUsize,
) -> Vec<Level> {
    let increment = div(base_reserves, &BigDecimal::from(segments.get() as u64));

    (1..=segments.get())
        .map(|i| {
            let amount_in = &increment * BigDecimal::from(i as u64);
            let (reserves_in, reserves_out) = if i == 1 {
                (base_reserves.clone(), quote_reserves.clone())
            } else {
                let consumed = swap_quote(&(&amount_in - &increment), base_reserves, quote_reserves);
                (consumed.reserves_in_after, consumed.reserves_out_after)
            };
            let step = swap_quote(&increment, &reserves_in, &reserves_out);
            // Increments below the division scale round to zero.
            let price = if amount_in.is_zero() {
                BigDecimal::zero()
            } else {
                div(&step.amount_out, &amount_in)
            };
            Level::new(amount_in, price)
        })
        .collect()
}

/// Build both sides of the synthetic book.
///
/// Returns an empty book when either reserve is zero. Asks are walked from
/// the quote side and their prices inverted so both ladders share the
/// quote-per-base unit.
pub fn compute_order_book(
    base_reserves: &BigDecimal,
    quote_reserves: &BigDecimal,
    segments: NonZeroUsize,
) -> OrderBook {
    if base_reserves.is_zero() || quote_reserves.is_zero() {
        return OrderBook::empty();
    }

    let one = BigDecimal::one();
    let bids = compute_bids(base_reserves, quote_reserves, segments);
    let asks = compute_bids(quote_reserves, base_reserves, segments)
        .into_iter()
        .map(|level| {
            // A price below the division scale rounds to zero; leave it unpriced.
            let price = if level.price.is_zero() {
                BigDecimal::zero()
            } else {
                div(&one, &level.price)
            };
            Level::new(level.amount, price)
        })
        .collect();

    OrderBook { bids, asks }
}
