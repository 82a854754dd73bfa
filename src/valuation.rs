//! Valuation: what it costs (or yields) to trade the target size right now.
//!
//! Walks one side from its best price outward, taking whole levels until
//! the remaining size fits inside a level, then takes part of that one.
//! The walk also records the levels it touched on the book so the next
//! event can be checked against them.

use std::fmt;

use crate::boundary::LevelUse;
use crate::{Notional, OrderBook, Quantity, Side};

/// Outcome of a valuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValuationKind {
    /// Total price of filling the target, rounded to cents
    Priced(Notional),
    /// The side holds less than the target
    InsufficientLiquidity,
}

/// A valuation of one side of the book.
///
/// Valuing the bids answers "what would selling the target yield", so it
/// is labelled `S`; valuing the asks answers "what would buying cost" and
/// is labelled `B`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Valuation {
    /// The side of the book that was walked
    pub side: Side,
    pub kind: ValuationKind,
}

impl Valuation {
    /// The side doing the trading, shown on output lines.
    #[inline]
    pub fn label(&self) -> Side {
        self.side.opposite()
    }

    /// The priced amount, if the target could be filled.
    pub fn amount(&self) -> Option<Notional> {
        match self.kind {
            ValuationKind::Priced(amount) => Some(amount),
            ValuationKind::InsufficientLiquidity => None,
        }
    }

    #[inline]
    pub fn is_priced(&self) -> bool {
        matches!(self.kind, ValuationKind::Priced(_))
    }
}

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValuationKind::Priced(amount) => write!(f, "{} {}", self.label().letter(), amount),
            ValuationKind::InsufficientLiquidity => write!(f, "{} NA", self.label().letter()),
        }
    }
}

/// Value `target` shares against `side` of the book.
///
/// Replaces the side's record of levels used by the last valuation. When
/// the side holds less than `target` the record is cleared and the result
/// is [`ValuationKind::InsufficientLiquidity`].
///
/// # Panics
///
/// Panics if `target` is zero.
pub fn evaluate(book: &mut OrderBook, side: Side, target: Quantity) -> Valuation {
    assert!(target > 0, "target size must be positive");

    let book_side = book.side(side);
    if book_side.total_size() < target {
        book.record_valuation(side, None);
        return Valuation {
            side,
            kind: ValuationKind::InsufficientLiquidity,
        };
    }

    let mut remaining = target;
    let mut ticks: i128 = 0;
    let mut used = Vec::new();

    for level in book_side.levels().iter_best_to_worst() {
        let price = level.price();
        let take = remaining.min(level.total_size());
        ticks += i128::from(take) * i128::from(price.0);
        used.push(LevelUse {
            price,
            consumed: take,
        });
        remaining -= take;
        if remaining == 0 {
            break;
        }
    }
    // The running total covered the target, so the walk must have too.
    assert_eq!(remaining, 0, "{side} levels short of running total");

    book.record_valuation(side, Some(used));
    Valuation {
        side,
        kind: ValuationKind::Priced(Notional::from_ticks(ticks)),
    }
}
