//! Session: one pricing run over one ordered event stream.
//!
//! Owns the book plus the per-side driver state:
//! - a one-way "target reached" latch, set the first time the side holds
//!   at least the target and never cleared afterwards
//! - the last valuation emitted, so an unchanged result is not repeated
//!
//! Valuation is attempted only for sides that are latched and flagged by
//! the book. Once latched, a flagged side keeps being valued even after its
//! size drops back under the target, which is what produces the `NA` lines.

use std::fmt;
use std::io::{self, BufRead, Write};

use log::{info, trace, warn};

use crate::{
    Config, Event, EventError, OrderBook, Quantity, Side, Timestamp, Valuation, valuation,
};

/// One output line: a valuation stamped with the event that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub timestamp: Timestamp,
    pub valuation: Valuation,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp, self.valuation)
    }
}

/// Counters for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Lines read, blank ones included
    pub lines: u64,
    /// Events applied to the book
    pub events: u64,
    /// Events rejected and skipped
    pub skipped: u64,
    /// Quotes emitted
    pub quotes: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} events applied, {} skipped, {} quotes",
            self.lines, self.events, self.skipped, self.quotes
        )
    }
}

/// A value kept per side of the book.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PerSide<T> {
    bids: T,
    asks: T,
}

impl<T> PerSide<T> {
    fn get(&self, side: Side) -> &T {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

/// Driver state for one run.
#[derive(Clone, Debug)]
pub struct Session {
    book: OrderBook,
    target: Quantity,
    reached: PerSide<bool>,
    last_emitted: PerSide<Option<Valuation>>,
    stats: RunStats,
}

impl Session {
    /// Start a run with an empty book.
    pub fn new(config: &Config) -> Self {
        let target = config.target();
        Self {
            book: OrderBook::new(target),
            target,
            reached: PerSide::default(),
            last_emitted: PerSide::default(),
            stats: RunStats::default(),
        }
    }

    /// The book as of the last processed event.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Whether `side` has ever held at least the target.
    pub fn target_reached(&self, side: Side) -> bool {
        *self.reached.get(side)
    }

    /// The last valuation emitted for `side`, if any.
    pub fn last_emitted(&self, side: Side) -> Option<&Valuation> {
        self.last_emitted.get(side).as_ref()
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Parse and process one wire line.
    pub fn process_line(&mut self, line: &str) -> Result<Vec<Quote>, EventError> {
        let event = Event::parse(line).inspect_err(|_| self.stats.skipped += 1)?;
        self.process_event(event)
    }

    /// Apply one event and return the quotes it produces.
    ///
    /// On error the event is skipped and the book is unchanged.
    pub fn process_event(&mut self, event: Event) -> Result<Vec<Quote>, EventError> {
        let timestamp = event.timestamp();
        let signal = self
            .book
            .apply(event)
            .inspect_err(|_| self.stats.skipped += 1)?;
        self.stats.events += 1;

        for side in Side::ALL {
            if self.book.total_size(side) >= self.target {
                *self.reached.get_mut(side) = true;
            }
        }

        let mut quotes = Vec::new();
        for side in Side::ALL {
            if !(signal.for_side(side) && self.target_reached(side)) {
                continue;
            }
            let valuation = valuation::evaluate(&mut self.book, side, self.target);
            let last = self.last_emitted.get_mut(side);
            if *last == Some(valuation) {
                trace!("{timestamp}: {valuation} unchanged");
                continue;
            }
            *last = Some(valuation);
            quotes.push(Quote {
                timestamp,
                valuation,
            });
        }

        self.stats.quotes += quotes.len() as u64;
        Ok(quotes)
    }

    /// Process every line of `input`, writing quotes to `output`.
    ///
    /// Bad events are logged and skipped. I/O errors end the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<RunStats> {
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            self.stats.lines += 1;
            if line.trim().is_empty() {
                continue;
            }
            match self.process_line(&line) {
                Ok(quotes) => {
                    for quote in quotes {
                        writeln!(output, "{quote}")?;
                    }
                }
                Err(e) => warn!("line {}: {e}, skipping it", index + 1),
            }
        }
        output.flush()?;

        info!("run finished: {}", self.stats);
        Ok(self.stats)
    }
}
