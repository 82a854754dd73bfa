//! Order side: Buy or Sell

use std::fmt;

use crate::Price;

/// Side of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Both sides, bids first.
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];

    /// Returns the opposite side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Wire letter: `B` or `S`.
    #[inline]
    pub fn letter(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }

    /// Parse a wire side field. Only `B` and `S` are accepted.
    pub fn from_letter(field: &str) -> Option<Self> {
        match field {
            "B" => Some(Side::Buy),
            "S" => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns true if `price` is strictly better than `other` on this side.
    ///
    /// Better is higher for bids and lower for asks.
    #[inline]
    pub fn is_better(self, price: Price, other: Price) -> bool {
        match self {
            Side::Buy => price > other,
            Side::Sell => price < other,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}
