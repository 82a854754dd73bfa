//! PriceLevels: the aggregated levels of one side of the book.
//!
//! Maintains levels sorted by price together with a running total so the
//! target-crossing check never has to sum the side.

use std::collections::BTreeMap;

use crate::{Price, PriceLevel, Quantity, Side};

/// All price levels of one side (all bids or all asks).
///
/// - **Bids**: walked high → low, best = highest price
/// - **Asks**: walked low → high, best = lowest price
///
/// A level exists exactly while its total is non-zero.
#[derive(Clone, Debug)]
pub struct PriceLevels {
    /// Price levels, sorted by price
    levels: BTreeMap<Price, PriceLevel>,
    /// Sum of all level totals
    total_size: Quantity,
    /// Which side this represents (determines walk order)
    side: Side,
}

impl PriceLevels {
    /// Create a new empty collection for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            levels: BTreeMap::new(),
            total_size: 0,
            side,
        }
    }

    /// Returns which side this collection represents.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns true if there is no resting size on this side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the number of distinct price levels.
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Returns the running total across all levels.
    ///
    /// O(1) - maintained on every mutation.
    #[inline]
    pub fn total_size(&self) -> Quantity {
        self.total_size
    }

    /// Returns the best price (highest for bids, lowest for asks).
    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    /// Returns the level at the given price, if it exists.
    pub fn get_level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Returns the resting size at `price`, zero if there is no level.
    pub fn size_at(&self, price: Price) -> Quantity {
        self.levels.get(&price).map_or(0, PriceLevel::total_size)
    }

    /// Add an order's size at the given price, creating the level if needed.
    ///
    /// Zero-size orders never create a level.
    pub(crate) fn add(&mut self, price: Price, size: Quantity) {
        if size == 0 {
            return;
        }
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .add_order(size);
        self.total_size += size;
    }

    /// Remove `amount` from the level at `price`.
    ///
    /// Removes the level entirely once it empties. Returns what is left at
    /// that price afterwards.
    ///
    /// # Panics
    ///
    /// Panics if there is no level at `price` while `amount > 0`.
    pub(crate) fn reduce(&mut self, price: Price, amount: Quantity, order_removed: bool) -> Quantity {
        let Some(level) = self.levels.get_mut(&price) else {
            assert!(amount == 0, "no level at {price} to reduce by {amount}");
            return 0;
        };
        level.reduce(amount, order_removed);
        self.total_size -= amount;

        let remaining = level.total_size();
        if remaining == 0 {
            self.levels.remove(&price);
        }
        remaining
    }

    /// Returns an iterator over levels from best to worst price.
    ///
    /// - Bids: highest to lowest
    /// - Asks: lowest to highest
    pub fn iter_best_to_worst(&self) -> impl Iterator<Item = &PriceLevel> {
        BestToWorstIter {
            inner: if self.side == Side::Buy {
                IterDirection::Reverse(self.levels.values().rev())
            } else {
                IterDirection::Forward(self.levels.values())
            },
        }
    }
}

/// Direction wrapper for the iterator.
enum IterDirection<F, R> {
    Forward(F),
    Reverse(R),
}

type LevelIter<'a> = std::collections::btree_map::Values<'a, Price, PriceLevel>;

/// Iterator that yields levels from best to worst price.
struct BestToWorstIter<'a> {
    inner: IterDirection<LevelIter<'a>, std::iter::Rev<LevelIter<'a>>>,
}

impl<'a> Iterator for BestToWorstIter<'a> {
    type Item = &'a PriceLevel;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterDirection::Forward(iter) => iter.next(),
            IterDirection::Reverse(iter) => iter.next(),
        }
    }
}
