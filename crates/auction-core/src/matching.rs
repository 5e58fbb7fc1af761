//! The matching step: one incoming order against the book.
//!
//! Callers must serialize invocations: the whole step has to run
//! without interleaving from any other book mutation, which is what
//! makes the resulting trade sequence equal to committing orders one at
//! a time in queue-pop order.

use tracing::debug;

use crate::ledger::MatchRecord;
use crate::order::Order;
use crate::order_book::OrderBook;
use crate::price::Price;
use crate::side::Side;

/// What one matching step did.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Executed pairings, in execution order.
    pub executions: Vec<MatchRecord>,
    /// The incoming order's remainder left resting on its own side, if any.
    pub resting: Option<Order>,
}

/// Match `incoming` against the opposite side of the book.
///
/// Walks the opposite side from its best level while the incoming order
/// still crosses, filling each level's head (oldest arrival) with
/// `min(incoming remaining, head remaining)`. Partially filled heads are
/// reduced in place at the front of their queue, never re-queued, so
/// time priority survives partial fills. Whatever remains of the
/// incoming order afterwards is appended to the back of its own side's
/// level at its limit price.
///
/// Each execution records both counterparties' raw limit prices; no
/// single trade price is derived from them.
pub fn match_incoming(book: &mut OrderBook, incoming: Order) -> MatchOutcome {
    let mut executions = Vec::new();
    let mut remaining = incoming;

    while remaining.amount > 0 {
        let Some((best_price, head)) = book.best_opposite(remaining.side) else {
            break;
        };
        if !crosses(remaining.side, remaining.price, best_price) {
            break;
        }

        let matched = remaining.amount.min(head.amount);
        debug_assert!(matched > 0);

        let record = match remaining.side {
            Side::Buy => MatchRecord {
                buy_price: remaining.price,
                sell_price: head.price,
                amount: matched,
            },
            Side::Sell => MatchRecord {
                buy_price: head.price,
                sell_price: remaining.price,
                amount: matched,
            },
        };
        debug!(
            buy_price = %record.buy_price,
            sell_price = %record.sell_price,
            amount = matched,
            "matched"
        );

        book.fill_head(remaining.side.opposite(), best_price, matched);
        remaining = remaining.reduce(matched);
        executions.push(record);
    }

    let resting = if remaining.amount > 0 {
        book.insert_resting(remaining);
        Some(remaining)
    } else {
        None
    };

    // A completed step can never leave the book crossed: either the
    // incoming order consumed everything it crossed, or it didn't cross
    // and rested strictly inside the spread.
    debug_assert!(!book.is_crossed());

    MatchOutcome {
        executions,
        resting,
    }
}

/// Crossing test: a buy crosses when its price reaches down to the best
/// ask, a sell when its price reaches up to the best bid.
fn crosses(side: Side, price: Price, best_opposite: Price) -> bool {
    match side {
        Side::Buy => price >= best_opposite,
        Side::Sell => price <= best_opposite,
    }
}
