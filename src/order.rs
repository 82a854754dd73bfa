//! Live resting order

use crate::{OrderId, Price, Quantity, Side, Timestamp};

/// A resting order on one side of the book.
///
/// Created by an Add event and shrunk by Reduce events. The book drops it
/// as soon as its size reaches zero, so a stored order always has `size > 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    /// Identifier from the wire
    pub id: OrderId,
    /// Buy or sell; fixed at creation
    pub side: Side,
    /// Limit price
    pub price: Price,
    /// Shares still resting
    pub size: Quantity,
    /// Timestamp of the Add event
    pub timestamp: Timestamp,
}

impl Order {
    pub fn new(
        id: OrderId,
        side: Side,
        price: Price,
        size: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            side,
            price,
            size,
            timestamp,
        }
    }

    /// Shrink the order by up to `requested` shares.
    ///
    /// Returns the amount actually removed, which is capped at the current
    /// size so the order never goes negative.
    pub fn reduce(&mut self, requested: Quantity) -> Quantity {
        let reduced = requested.min(self.size);
        self.size -= reduced;
        reduced
    }

    /// Returns true once nothing is left to rest.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.size == 0
    }
}
