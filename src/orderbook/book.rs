use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};

/// One synthetic price level: cumulative size and average fill price.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub amount: BigDecimal,
    pub price: BigDecimal,
}

impl Level {
    pub fn new(amount: BigDecimal, price: BigDecimal) -> Self {
        Self { amount, price }
    }

    pub fn amount_string(&self) -> String {
        to_plain_string(&self.amount)
    }

    pub fn price_string(&self) -> String {
        to_plain_string(&self.price)
    }
}

/// Serialized as `[amount, price]`, both decimal strings.
impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.amount_string(), self.price_string()).serialize(serializer)
    }
}

/// Bid and ask ladders, each ordered by increasing depth.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderBook {
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
}

impl OrderBook {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// Plain decimal notation, trailing zeros stripped.
pub fn to_plain_string(value: &BigDecimal) -> String {
    value.normalized().to_plain_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn plain_string_strips_trailing_zeros() {
        assert_eq!(to_plain_string(&dec("250000.00000")), "250000");
        assert_eq!(to_plain_string(&dec("1.50000000000000000000")), "1.5");
        assert_eq!(to_plain_string(&dec("0.000")), "0");
    }

    #[test]
    fn plain_string_never_uses_exponent() {
        assert_eq!(to_plain_string(&dec("1e24")), "1000000000000000000000000");
        assert_eq!(to_plain_string(&dec("1e-9")), "0.000000001");
    }

    #[test]
    fn level_serializes_as_string_pair() {
        let level = Level::new(dec("250000"), dec("1.25000"));
        let json = serde_json::to_value(&level).unwrap();
        assert_eq!(json, serde_json::json!(["250000", "1.25"]));
    }

    #[test]
    fn empty_book_serializes_with_both_sides() {
        let json = serde_json::to_value(OrderBook::empty()).unwrap();
        assert_eq!(json, serde_json::json!({ "bids": [], "asks": [] }));
    }
}
