// Allow our units.fraction digit grouping convention (e.g., 44_2600 = 44.26, 8832_56 = 8832.56)
#![allow(clippy::inconsistent_digit_grouping)]

//! # book-pricer
//!
//! An incremental limit order book that prices a fixed target size against
//! resting liquidity, one market-data event at a time.
//!
//! ## Features
//!
//! - **Event feed**: whitespace-separated Add / Reduce lines
//! - **Target-size valuation**: proceeds of selling into the bids, cost of buying from the asks
//! - **Incremental**: a side is only re-walked when an event can change its valuation
//! - **Fixed-point prices**: 4 decimal places in, cents out, rounded once
//!
//! ## Quick Start
//!
//! ```
//! use book_pricer::{Config, Session};
//!
//! let mut session = Session::new(&Config::with_target(200).unwrap());
//!
//! let input = "\
//! 28800538 A b S 44.26 100
//! 28800562 A c B 44.10 100
//! 28800744 R b 100
//! 28800758 A d B 44.18 157
//! 28800773 A e S 44.38 100
//! 28800796 R d 157
//! ";
//! let mut out = Vec::new();
//! session.run(input.as_bytes(), &mut out).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "28800758 S 8832.56\n28800796 S NA\n"
//! );
//! ```
//!
//! ## Wire format
//!
//! | Event  | Fields |
//! |--------|--------|
//! | Add    | `timestamp A order-id side price size` |
//! | Reduce | `timestamp R order-id size` |
//!
//! Output lines are `timestamp action total`, where `action` is `S` for a
//! valuation of the bids and `B` for a valuation of the asks, and `total`
//! is either a two-decimal amount or `NA`.
//!
//! ## Price Representation
//!
//! Prices are stored as [`i64`] in ten-thousandths:
//!
//! ```
//! use book_pricer::Price;
//!
//! let price = Price::from_f64(44.26).unwrap();
//! assert_eq!(price, Price(44_2600));
//! assert_eq!(price.to_string(), "44.2600");
//! ```
//!
//! ## Using the book directly
//!
//! ```
//! use book_pricer::{evaluate, Event, OrderBook, Price, Side};
//!
//! let mut book = OrderBook::new(12);
//! book.apply(Event::add(1, "a", Side::Buy, Price(100_0000), 10)).unwrap();
//! let signal = book.apply(Event::add(2, "b", Side::Buy, Price(99_0000), 5)).unwrap();
//! assert!(signal.needs_profit_recalc);
//!
//! let valuation = evaluate(&mut book, Side::Buy, 12);
//! assert_eq!(valuation.to_string(), "S 1198.00");
//! ```

mod boundary;
mod book;
mod config;
mod error;
mod event;
mod level;
mod order;
mod price_levels;
mod session;
mod side;
mod types;
mod valuation;

pub use boundary::{LevelUse, ValuationBoundary, crosses_target, reduce_invalidates};
pub use book::{BookSide, OrderBook, RecomputeSignal};
pub use config::{Config, LoggingConfig, PricerConfig};
pub use error::{ConfigError, EventError};
pub use event::{Action, Event};
pub use level::PriceLevel;
pub use order::Order;
pub use price_levels::PriceLevels;
pub use session::{Quote, RunStats, Session};
pub use side::Side;
pub use types::{Notional, OrderId, Price, Quantity, Timestamp};
pub use valuation::{Valuation, ValuationKind, evaluate};
