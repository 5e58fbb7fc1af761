//! Aggregated views over resting liquidity.
//!
//! These types are ephemeral: recomputed on every query from the live
//! queues, never stored or kept in sync incrementally.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::order::Order;
use crate::price::Price;
use crate::side::Side;

/// Total resting amount at one price on one side.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Price,
    /// Sum of remaining amounts across the level's queue. Wider than a
    /// single order amount so a deep level cannot overflow.
    pub amount: u64,
    pub side: Side,
}

impl PriceLevel {
    pub(crate) fn aggregate(price: Price, queue: &VecDeque<Order>, side: Side) -> Self {
        let amount = queue.iter().map(|order| u64::from(order.amount)).sum();
        PriceLevel {
            price,
            amount,
            side,
        }
    }
}

/// The best `n` price levels per side, most favorable first.
///
/// Bids descend from the highest price, asks ascend from the lowest. An
/// empty side is an empty vector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookDepth {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}
