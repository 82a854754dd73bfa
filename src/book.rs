//! OrderBook: both sides of the book plus the recompute heuristic.
//!
//! Each side combines:
//! - aggregated price levels in walk order (bids high → low, asks low → high)
//! - an index of its live orders for O(1) lookup by id
//! - the boundary recorded by its last valuation
//!
//! `apply` is the only way to change the book. It reports, per side,
//! whether the cached target-size valuation may now be stale.

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::boundary::{self, LevelUse, ValuationBoundary};
use crate::{Event, EventError, Order, OrderId, Price, PriceLevels, Quantity, Side};

/// Which valuations an applied event may have invalidated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecomputeSignal {
    /// Bid side changed in a way that can move the sale proceeds
    pub needs_profit_recalc: bool,
    /// Ask side changed in a way that can move the purchase cost
    pub needs_cost_recalc: bool,
}

impl RecomputeSignal {
    /// Returns the flag for one side.
    #[inline]
    pub fn for_side(self, side: Side) -> bool {
        match side {
            Side::Buy => self.needs_profit_recalc,
            Side::Sell => self.needs_cost_recalc,
        }
    }

    /// Returns true if either side needs a recompute.
    #[inline]
    pub fn any(self) -> bool {
        self.needs_profit_recalc || self.needs_cost_recalc
    }

    fn set(&mut self, side: Side) {
        match side {
            Side::Buy => self.needs_profit_recalc = true,
            Side::Sell => self.needs_cost_recalc = true,
        }
    }
}

/// One side of the book: levels, live orders and valuation boundary.
#[derive(Clone, Debug)]
pub struct BookSide {
    levels: PriceLevels,
    orders: FxHashMap<OrderId, Order>,
    boundary: ValuationBoundary,
}

impl BookSide {
    fn new(side: Side) -> Self {
        Self {
            levels: PriceLevels::new(side),
            orders: FxHashMap::default(),
            boundary: ValuationBoundary::new(),
        }
    }

    /// Aggregated price levels in walk order.
    #[inline]
    pub fn levels(&self) -> &PriceLevels {
        &self.levels
    }

    /// Sum of all resting size on this side.
    #[inline]
    pub fn total_size(&self) -> Quantity {
        self.levels.total_size()
    }

    /// What the last valuation on this side touched.
    #[inline]
    pub fn boundary(&self) -> &ValuationBoundary {
        &self.boundary
    }

    /// Look up a live order by id.
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Returns the number of live orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Iterate over live orders in no particular order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    fn contains(&self, order_id: &OrderId) -> bool {
        self.orders.contains_key(order_id)
    }

    /// Shrink a live order by up to `requested`, keeping its level in step.
    ///
    /// Returns the order's price and the size left at that price.
    fn reduce_order(&mut self, order_id: &OrderId, requested: Quantity) -> Option<(Price, Quantity)> {
        let order = self.orders.get_mut(order_id)?;
        let price = order.price;
        let reduced = order.reduce(requested);
        let removed = order.is_exhausted();
        if removed {
            self.orders.remove(order_id);
        }
        let remaining = self.levels.reduce(price, reduced, removed);
        Some((price, remaining))
    }

    /// Whether a reduce that left `level_remaining` at `price` invalidates
    /// the cached valuation.
    fn reduce_invalidates(&self, price: Price, level_remaining: Quantity) -> bool {
        boundary::reduce_invalidates(
            self.levels.side(),
            self.boundary.price(),
            self.boundary.consumed_at_boundary(),
            price,
            level_remaining,
        )
    }
}

/// The complete order book for a single instrument.
#[derive(Clone, Debug)]
pub struct OrderBook {
    /// Buy orders, walked from highest price
    bids: BookSide,
    /// Sell orders, walked from lowest price
    asks: BookSide,
    /// Size every valuation must fill
    target: Quantity,
}

impl OrderBook {
    /// Create an empty book that values `target` shares.
    ///
    /// # Panics
    ///
    /// Panics if `target` is zero.
    pub fn new(target: Quantity) -> Self {
        assert!(target > 0, "target size must be positive");
        Self {
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            target,
        }
    }

    /// The target size this book reports crossings against.
    #[inline]
    pub fn target(&self) -> Quantity {
        self.target
    }

    // === Book access ===

    /// Get one side of the book.
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Get the bids side.
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    /// Get the asks side.
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    /// Running total of one side.
    pub fn total_size(&self, side: Side) -> Quantity {
        self.side(side).total_size()
    }

    /// Best price of one side (highest bid, lowest ask).
    pub fn best_price(&self, side: Side) -> Option<Price> {
        self.side(side).levels.best_price()
    }

    /// Price levels of one side, in walk order.
    pub fn levels(&self, side: Side) -> &PriceLevels {
        self.side(side).levels()
    }

    /// Boundary left by the last valuation of one side.
    pub fn boundary(&self, side: Side) -> &ValuationBoundary {
        self.side(side).boundary()
    }

    /// Find a live order on either side.
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.bids
            .order(order_id)
            .or_else(|| self.asks.order(order_id))
    }

    /// Which side an id is live on, if any.
    pub fn resolve_side(&self, order_id: &OrderId) -> Option<Side> {
        if self.bids.contains(order_id) {
            Some(Side::Buy)
        } else if self.asks.contains(order_id) {
            Some(Side::Sell)
        } else {
            None
        }
    }

    // === Event application ===

    /// Apply one event and report which valuations may be stale.
    ///
    /// A Reduce whose id is live on neither side fails with
    /// [`EventError::UnknownOrder`] and leaves the book untouched.
    pub fn apply(&mut self, event: Event) -> Result<RecomputeSignal, EventError> {
        match event {
            Event::Add {
                timestamp,
                order_id,
                side,
                price,
                size,
            } => Ok(self.apply_add(Order::new(order_id, side, price, size, timestamp))),
            Event::Reduce { order_id, size, .. } => self.apply_reduce(&order_id, size),
        }
    }

    fn apply_add(&mut self, order: Order) -> RecomputeSignal {
        let mut signal = RecomputeSignal::default();

        // Re-adding a live id replaces it: withdraw the old order first.
        if let Some(old_side) = self.resolve_side(&order.id) {
            debug!("replacing live order {} on {}", order.id, old_side);
            if let Ok(withdrawn) = self.apply_reduce(&order.id, Quantity::MAX) {
                signal.needs_profit_recalc |= withdrawn.needs_profit_recalc;
                signal.needs_cost_recalc |= withdrawn.needs_cost_recalc;
            }
        }

        let target = self.target;
        let side = order.side;
        let book_side = self.side_mut(side);

        let prior = book_side.total_size();
        book_side.levels.add(order.price, order.size);
        let current = book_side.total_size();

        let better = book_side.boundary.add_invalidates(side, order.price);
        let crossed = boundary::crosses_target(prior, current, target);
        trace!(
            "add {} {} {}@{}: better={better} crossed={crossed}",
            order.id, side, order.size, order.price
        );
        if better || crossed {
            signal.set(side);
        }

        if !order.is_exhausted() {
            book_side.orders.insert(order.id.clone(), order);
        }
        signal
    }

    fn apply_reduce(
        &mut self,
        order_id: &OrderId,
        requested: Quantity,
    ) -> Result<RecomputeSignal, EventError> {
        let side = self
            .resolve_side(order_id)
            .ok_or_else(|| EventError::UnknownOrder(order_id.clone()))?;
        let book_side = self.side_mut(side);

        let mut signal = RecomputeSignal::default();
        if let Some((price, remaining)) = book_side.reduce_order(order_id, requested) {
            let stale = book_side.reduce_invalidates(price, remaining);
            trace!("reduce {order_id} {side} @{price}: remaining={remaining} stale={stale}");
            if stale {
                signal.set(side);
            }
        }
        Ok(signal)
    }

    /// Store the outcome of a valuation walk on `side`.
    ///
    /// `None` means the side could not fill the target and nothing was touched.
    pub(crate) fn record_valuation(&mut self, side: Side, used: Option<Vec<LevelUse>>) {
        let boundary = &mut self.side_mut(side).boundary;
        match used {
            Some(used) => boundary.record(used),
            None => boundary.clear_used(),
        }
    }
}
