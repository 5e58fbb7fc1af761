//! Order values and their boundary representation.
//!
//! An [`Order`] is immutable once accepted: partial fills produce fresh
//! values through [`Order::reduce`], so nothing ever aliases a mutable
//! order across the matching step.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RejectReason;
use crate::price::Price;
use crate::side::Side;

/// Engine-assigned order identifier, unique per engine instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(Uuid);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An order as submitted over the boundary, before acceptance.
///
/// Carries raw boundary values; validation happens in [`Order::accept`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub price: f64,
    pub amount: u32,
    pub side: Side,
}

/// An accepted order.
///
/// `amount` is the remaining unfilled quantity; it only ever decreases,
/// and an order with zero remaining amount is never stored anywhere.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub price: Price,
    pub amount: u32,
    pub side: Side,
}

impl Order {
    /// Validate a boundary request and mint the internal order with a
    /// fresh id. Acceptance means "may enter the queue", not "matched".
    pub fn accept(request: OrderRequest) -> Result<Self, RejectReason> {
        let price = Price::new(request.price)?;
        if request.amount == 0 {
            return Err(RejectReason::ZeroAmount);
        }
        Ok(Order {
            id: OrderId(Uuid::new_v4()),
            price,
            amount: request.amount,
            side: request.side,
        })
    }

    /// A copy of this order with `matched` units removed.
    ///
    /// `matched` must not exceed the remaining amount.
    pub fn reduce(&self, matched: u32) -> Order {
        debug_assert!(matched <= self.amount);
        Order {
            amount: self.amount - matched,
            ..*self
        }
    }
}
