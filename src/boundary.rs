//! Valuation boundary and the recompute predicates built on it.
//!
//! After a successful valuation each side remembers the worst price it had
//! to reach and how much it took from every level on the way. On the next
//! event that record decides whether the cached valuation still holds:
//!
//! | Event  | Price vs boundary | Recompute? |
//! |--------|-------------------|------------|
//! | Add    | strictly better   | yes |
//! | Add    | equal or worse    | only if the side just crossed the target |
//! | Reduce | strictly better   | yes |
//! | Reduce | equal             | only if the level can no longer supply what it supplied |
//! | Reduce | strictly worse    | no |
//!
//! An absent boundary (no valuation yet) counts as worse than every price.

use crate::{Price, Quantity, Side};

/// How much one level contributed to the last valuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUse {
    pub price: Price,
    pub consumed: Quantity,
}

/// What the last valuation on a side touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValuationBoundary {
    /// Worst price reached by the last priced valuation
    price: Option<Price>,
    /// Levels touched, in walk order; the last one sits at `price`
    used: Vec<LevelUse>,
}

impl ValuationBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Worst price reached by the last priced valuation, if any.
    #[inline]
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// Levels touched by the last valuation, best first.
    pub fn used_levels(&self) -> &[LevelUse] {
        &self.used
    }

    /// Shares the boundary level supplied to the last valuation.
    ///
    /// Zero when the last valuation touched nothing.
    pub fn consumed_at_boundary(&self) -> Quantity {
        match (self.price, self.used.last()) {
            (Some(price), Some(last)) if last.price == price => last.consumed,
            _ => 0,
        }
    }

    /// Replace the record with the result of a priced walk.
    pub(crate) fn record(&mut self, used: Vec<LevelUse>) {
        self.price = used.last().map(|u| u.price).or(self.price);
        self.used = used;
    }

    /// Forget the used levels after a valuation that touched none.
    ///
    /// The boundary price itself is kept.
    pub(crate) fn clear_used(&mut self) {
        self.used.clear();
    }

    /// Whether an Add at `price` on `side` can improve the cached valuation.
    pub fn add_invalidates(&self, side: Side, price: Price) -> bool {
        is_inside(side, self.price, price)
    }
}

/// True if `price` is strictly better than `boundary`, or there is no boundary.
#[inline]
fn is_inside(side: Side, boundary: Option<Price>, price: Price) -> bool {
    boundary.is_none_or(|b| side.is_better(price, b))
}

/// Decide whether a Reduce invalidates the cached valuation on `side`.
///
/// - `boundary`: worst price of the last valuation (`None` if never valued)
/// - `consumed_at_boundary`: shares the boundary level supplied to it
/// - `reduced_price`: price of the order that was reduced
/// - `level_remaining`: size left at `reduced_price` after the reduce
pub fn reduce_invalidates(
    side: Side,
    boundary: Option<Price>,
    consumed_at_boundary: Quantity,
    reduced_price: Price,
    level_remaining: Quantity,
) -> bool {
    if is_inside(side, boundary, reduced_price) {
        return true;
    }
    if boundary == Some(reduced_price) {
        return level_remaining < consumed_at_boundary;
    }
    false
}

/// True if a side total moved from below `target` to at-or-above it.
#[inline]
pub fn crosses_target(prior: Quantity, current: Quantity, target: Quantity) -> bool {
    prior < target && current >= target
}
