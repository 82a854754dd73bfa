//! Order-book events and their wire format.
//!
//! One event per line, whitespace-separated:
//!
//! | Action | Shape |
//! |--------|-------|
//! | Add    | `<timestamp> A <order-id> <B\|S> <price> <size>` |
//! | Reduce | `<timestamp> R <order-id> <size>` |
//!
//! A reduce carries no side; the book resolves it from its live orders.

use std::str::FromStr;

use crate::{EventError, OrderId, Price, Quantity, Side, Timestamp};

/// What an event does to the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Reduce,
}

impl Action {
    /// Wire letter: `A` or `R`.
    pub fn letter(self) -> char {
        match self {
            Action::Add => 'A',
            Action::Reduce => 'R',
        }
    }
}

/// A single, immutable order-book event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A new resting order
    Add {
        timestamp: Timestamp,
        order_id: OrderId,
        side: Side,
        price: Price,
        size: Quantity,
    },
    /// Shrink (possibly to zero) an existing resting order
    Reduce {
        timestamp: Timestamp,
        order_id: OrderId,
        size: Quantity,
    },
}

impl Event {
    /// Create an Add event.
    pub fn add(
        timestamp: Timestamp,
        order_id: impl Into<OrderId>,
        side: Side,
        price: Price,
        size: Quantity,
    ) -> Self {
        Event::Add {
            timestamp,
            order_id: order_id.into(),
            side,
            price,
            size,
        }
    }

    /// Create a Reduce event.
    pub fn reduce(timestamp: Timestamp, order_id: impl Into<OrderId>, size: Quantity) -> Self {
        Event::Reduce {
            timestamp,
            order_id: order_id.into(),
            size,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Event::Add { .. } => Action::Add,
            Event::Reduce { .. } => Action::Reduce,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Event::Add { timestamp, .. } | Event::Reduce { timestamp, .. } => *timestamp,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        match self {
            Event::Add { order_id, .. } | Event::Reduce { order_id, .. } => order_id,
        }
    }

    /// Parse one wire line.
    ///
    /// The timestamp is checked first, so a line with a bad timestamp is
    /// reported as such regardless of its shape.
    pub fn parse(line: &str) -> Result<Self, EventError> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        let Some(&first) = fields.first() else {
            return Err(EventError::malformed(line, "empty line"));
        };
        let timestamp: Timestamp = first
            .parse()
            .map_err(|_| EventError::MalformedTimestamp {
                field: first.to_owned(),
            })?;

        match (fields.len(), fields.get(1).copied()) {
            (6, Some("A")) => {
                let side = Side::from_letter(fields[3])
                    .ok_or_else(|| EventError::malformed(line, "side must be B or S"))?;
                let price = fields[4]
                    .parse::<f64>()
                    .ok()
                    .and_then(Price::from_f64)
                    .ok_or_else(|| EventError::malformed(line, "bad price"))?;
                let size = parse_size(line, fields[5])?;
                Ok(Event::add(timestamp, fields[2], side, price, size))
            }
            (4, Some("R")) => {
                let size = parse_size(line, fields[3])?;
                Ok(Event::reduce(timestamp, fields[2], size))
            }
            (6, _) | (4, _) => Err(EventError::malformed(line, "unknown action")),
            _ => Err(EventError::malformed(line, "wrong field count")),
        }
    }
}

/// Sizes on the wire are bounded by `u32` so running totals cannot overflow.
fn parse_size(line: &str, field: &str) -> Result<Quantity, EventError> {
    field
        .parse::<u32>()
        .map(Quantity::from)
        .map_err(|_| EventError::malformed(line, "bad size"))
}

impl FromStr for Event {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Event::parse(s)
    }
}
