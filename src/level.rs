//! PriceLevel: aggregated resting size at a single price point.
//!
//! Individual orders live in the side's order index; the level only keeps
//! the running total and a count, which is all valuation needs.

use crate::{Price, Quantity};

/// Aggregated liquidity at one price on one side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceLevel {
    /// The price for all orders in this level
    price: Price,
    /// Sum of live order sizes at this price
    total_size: Quantity,
    /// Number of live orders at this price
    order_count: usize,
}

impl PriceLevel {
    /// Create a new empty level at the given price.
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_size: 0,
            order_count: 0,
        }
    }

    /// Returns the price of this level.
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the total size across all orders at this level.
    #[inline]
    pub fn total_size(&self) -> Quantity {
        self.total_size
    }

    /// Returns the number of orders at this level.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Returns true if no size is left at this level.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_size == 0
    }

    /// Account for a new order resting at this price.
    pub(crate) fn add_order(&mut self, size: Quantity) {
        self.total_size += size;
        self.order_count += 1;
    }

    /// Take `amount` off the level total.
    ///
    /// `order_removed` is set when the reduced order left the book.
    ///
    /// # Panics
    ///
    /// Panics if `amount` exceeds the level total; the book only ever
    /// removes size that one of its orders holds.
    pub(crate) fn reduce(&mut self, amount: Quantity, order_removed: bool) {
        assert!(
            amount <= self.total_size,
            "reduce {} exceeds level total {} at {}",
            amount,
            self.total_size,
            self.price
        );
        self.total_size -= amount;
        if order_removed {
            self.order_count = self.order_count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_level_is_empty() {
        let level = PriceLevel::new(Price(100_0000));

        assert!(level.is_empty());
        assert_eq!(level.order_count(), 0);
        assert_eq!(level.total_size(), 0);
        assert_eq!(level.price(), Price(100_0000));
    }

    #[test]
    fn add_orders_accumulates() {
        let mut level = PriceLevel::new(Price(100_0000));

        level.add_order(100);
        level.add_order(200);
        level.add_order(150);

        assert!(!level.is_empty());
        assert_eq!(level.order_count(), 3);
        assert_eq!(level.total_size(), 450);
    }

    #[test]
    fn reduce_partial_keeps_order_count() {
        let mut level = PriceLevel::new(Price(100_0000));
        level.add_order(100);
        level.add_order(200);

        level.reduce(30, false);

        assert_eq!(level.total_size(), 270);
        assert_eq!(level.order_count(), 2);
    }

    #[test]
    fn reduce_to_empty() {
        let mut level = PriceLevel::new(Price(100_0000));
        level.add_order(100);

        level.reduce(100, true);

        assert!(level.is_empty());
        assert_eq!(level.order_count(), 0);
    }

    #[test]
    #[should_panic(expected = "exceeds level total")]
    fn reduce_beyond_total_panics() {
        let mut level = PriceLevel::new(Price(100_0000));
        level.add_order(10);
        level.reduce(11, true);
    }
}
