//! Validated price keys for the order book.
//!
//! Prices arrive from the boundary as `f64` but have to behave as totally
//! ordered map keys inside the book. `Price` admits only finite,
//! non-negative values, so [`f64::total_cmp`] coincides with the plain
//! numeric order and `Price` can key a `BTreeMap` directly.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RejectReason;

/// A validated, totally ordered order price.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Validate a raw boundary price.
    pub fn new(value: f64) -> Result<Self, RejectReason> {
        if !value.is_finite() {
            return Err(RejectReason::NonFinitePrice);
        }
        if value < 0.0 {
            return Err(RejectReason::NegativePrice(value));
        }
        // Collapse -0.0 so equal prices always land on one book level.
        let value = if value == 0.0 { 0.0 } else { value };
        Ok(Price(value))
    }

    /// The raw numeric value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = RejectReason;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> f64 {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
