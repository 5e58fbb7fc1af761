//! Single-instrument order book with price-time priority.
//!
//! - Bids: best = highest price.
//! - Asks: best = lowest price.
//! - FIFO (time priority) within each price level.
//!
//! We use `BTreeMap` so keys stay sorted; the bid side reads its best
//! level from the back, the ask side from the front. A price key never
//! outlives its last resting order: every mutation that empties a queue
//! removes the key in the same call.
//!
//! The mutation surface is deliberately narrow: exactly what one
//! serialized matching step needs. Callers are responsible for that
//! serialization; the book itself carries no locking.

use std::collections::{BTreeMap, VecDeque};

use crate::depth::{BookDepth, PriceLevel};
use crate::order::Order;
use crate::price::Price;
use crate::side::Side;

/// Two price-ordered sides of resting orders.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// Bids: price -> FIFO queue of orders at that price.
    bids: BTreeMap<Price, VecDeque<Order>>,

    /// Asks: price -> FIFO queue of orders at that price.
    asks: BTreeMap<Price, VecDeque<Order>>,
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Best price level opposite `side`, with a copy of its time-priority
    /// head: the lowest ask for an incoming buy, the highest bid for an
    /// incoming sell. `None` when no liquidity rests on that side.
    pub fn best_opposite(&self, side: Side) -> Option<(Price, Order)> {
        let (price, queue) = match side {
            Side::Buy => self.asks.iter().next(),
            Side::Sell => self.bids.iter().next_back(),
        }?;
        queue.front().map(|head| (*price, *head))
    }

    /// Consume `matched` units from the head order at `price` on `side`
    /// (the *resting* side). A fully filled head is popped; a partial
    /// fill replaces the head with a reduced copy, so its place in the
    /// queue and its time priority are preserved. A level whose queue
    /// empties is removed together with its key.
    pub fn fill_head(&mut self, side: Side, price: Price, matched: u32) {
        let levels = self.side_mut(side);
        let Some(queue) = levels.get_mut(&price) else {
            return;
        };
        if let Some(head) = queue.pop_front() {
            if head.amount > matched {
                queue.push_front(head.reduce(matched));
            }
        }
        if queue.is_empty() {
            levels.remove(&price);
        }
    }

    /// Append `order` to the back of its price level on its own side,
    /// creating the level on first use.
    pub fn insert_resting(&mut self, order: Order) {
        self.side_mut(order.side)
            .entry(order.price)
            .or_insert_with(VecDeque::new)
            .push_back(order);
    }

    /// Aggregate the best `levels` price levels per side, most favorable
    /// first. Recomputed from the live queues on every call.
    pub fn depth(&self, levels: usize) -> BookDepth {
        let bids = self
            .bids
            .iter()
            .rev()
            .take(levels)
            .map(|(price, queue)| PriceLevel::aggregate(*price, queue, Side::Buy))
            .collect();
        let asks = self
            .asks
            .iter()
            .take(levels)
            .map(|(price, queue)| PriceLevel::aggregate(*price, queue, Side::Sell))
            .collect();
        BookDepth { bids, asks }
    }

    /// Best bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Best ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// `true` if any bid reaches any ask. With both sides price-ordered
    /// this reduces to comparing the tops. A drained book must never be
    /// left crossed; matching asserts this after every step.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Sum of remaining amounts resting on `side`, across all levels.
    pub fn resting_amount(&self, side: Side) -> u64 {
        self.side(side)
            .values()
            .flat_map(|queue| queue.iter())
            .map(|order| u64::from(order.amount))
            .sum()
    }

    /// `true` if `side` holds no resting orders.
    pub fn side_is_empty(&self, side: Side) -> bool {
        self.side(side).is_empty()
    }

    fn side(&self, side: Side) -> &BTreeMap<Price, VecDeque<Order>> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BTreeMap<Price, VecDeque<Order>> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}
