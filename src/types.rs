//! Core types: Price, Quantity, Timestamp, OrderId, Notional

use std::fmt;

/// Price in ten-thousandths of a currency unit.
///
/// `Price(44_2600)` represents 44.26. Using fixed-point keeps level keys
/// exact and makes `price * size` accumulation free of floating-point error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(pub i64);

impl Price {
    /// Ticks per currency unit.
    pub const SCALE: i64 = 10_000;

    pub const ZERO: Price = Price(0);

    /// Convert a decimal price to the nearest tick.
    ///
    /// Returns `None` for negative, NaN or out-of-range values.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let ticks = (value * Self::SCALE as f64).round();
        if ticks > i64::MAX as f64 {
            return None;
        }
        Some(Price(ticks as i64))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / Self::SCALE;
        let frac = (self.0 % Self::SCALE).abs();
        if self.0 < 0 {
            write!(f, "-{}.{:04}", units.abs(), frac)
        } else {
            write!(f, "{}.{:04}", units, frac)
        }
    }
}

/// Number of shares. Always non-negative.
pub type Quantity = u64;

/// Event timestamp as it appears on the wire. Echoed back, never compared.
pub type Timestamp = i64;

/// Order identifier as it appears on the wire (an opaque string).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        OrderId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        OrderId(id.to_owned())
    }
}

/// A total cost or proceeds in whole cents.
///
/// Produced once per valuation by rounding the exact tick-scaled sum
/// half-up to two fractional digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Notional(pub i128);

impl Notional {
    /// Ticks in one cent.
    const TICKS_PER_CENT: i128 = (Price::SCALE / 100) as i128;

    /// Round an exact `Σ price_ticks * size` to cents, half-up.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` is negative; valuations only sum non-negative prices.
    pub fn from_ticks(ticks: i128) -> Self {
        assert!(ticks >= 0, "negative notional {ticks} ticks");
        Notional((ticks + Self::TICKS_PER_CENT / 2) / Self::TICKS_PER_CENT)
    }

    /// Whole cents.
    #[inline]
    pub fn cents(self) -> i128 {
        self.0
    }
}

impl fmt::Display for Notional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / 100;
        let cents = (self.0 % 100).abs();
        if self.0 < 0 {
            write!(f, "-{}.{:02}", units.abs(), cents)
        } else {
            write!(f, "{}.{:02}", units, cents)
        }
    }
}
