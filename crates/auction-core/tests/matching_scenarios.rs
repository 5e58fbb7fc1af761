//! Matching semantics exercised order by order, without the runtime.
//!
//! Every test drives `match_incoming` directly, the same serialized call
//! the worker pool makes, so these scenarios pin down the trade sequence
//! the engine must produce regardless of how submissions interleave.

use auction_core::{match_incoming, MatchRecord, Order, OrderBook, OrderRequest, Price, Side};

fn order(price: f64, amount: u32, side: Side) -> Order {
    Order::accept(OrderRequest {
        price,
        amount,
        side,
    })
    .expect("valid test order")
}

fn price(value: f64) -> Price {
    Price::new(value).expect("valid test price")
}

fn record(buy: f64, sell: f64, amount: u32) -> MatchRecord {
    MatchRecord {
        buy_price: price(buy),
        sell_price: price(sell),
        amount,
    }
}

#[test]
fn crossing_sell_clears_resting_buy() {
    let mut book = OrderBook::new();

    let outcome = match_incoming(&mut book, order(100.0, 10, Side::Buy));
    assert!(outcome.executions.is_empty());
    assert!(outcome.resting.is_some());

    let outcome = match_incoming(&mut book, order(90.0, 10, Side::Sell));
    assert_eq!(outcome.executions, vec![record(100.0, 90.0, 10)]);
    assert!(outcome.resting.is_none());

    assert!(book.side_is_empty(Side::Buy));
    assert!(book.side_is_empty(Side::Sell));
}

#[test]
fn equal_price_buys_fill_in_arrival_order() {
    let mut book = OrderBook::new();

    let first = order(100.0, 5, Side::Buy);
    let second = order(100.0, 5, Side::Buy);
    match_incoming(&mut book, first);
    match_incoming(&mut book, second);

    let outcome = match_incoming(&mut book, order(100.0, 7, Side::Sell));
    assert_eq!(
        outcome.executions,
        vec![record(100.0, 100.0, 5), record(100.0, 100.0, 2)]
    );
    assert!(outcome.resting.is_none());

    // order two survives with three units, still at the front of its level
    let (best, head) = book.best_opposite(Side::Sell).expect("resting bid");
    assert_eq!(best, price(100.0));
    assert_eq!(head.id, second.id);
    assert_eq!(head.amount, 3);
    assert!(book.side_is_empty(Side::Sell));
}

#[test]
fn lone_sell_shows_up_in_depth() {
    let mut book = OrderBook::new();
    match_incoming(&mut book, order(95.0, 10, Side::Sell));

    let depth = book.depth(10);
    assert!(depth.bids.is_empty());
    assert_eq!(depth.asks.len(), 1);
    assert_eq!(depth.asks[0].price, price(95.0));
    assert_eq!(depth.asks[0].amount, 10);
    assert_eq!(depth.asks[0].side, Side::Sell);
}

#[test]
fn non_crossing_orders_rest_on_their_own_sides() {
    let mut book = OrderBook::new();

    let buy = match_incoming(&mut book, order(90.0, 4, Side::Buy));
    let sell = match_incoming(&mut book, order(110.0, 6, Side::Sell));
    assert!(buy.executions.is_empty());
    assert!(sell.executions.is_empty());

    assert_eq!(book.best_bid(), Some(price(90.0)));
    assert_eq!(book.best_ask(), Some(price(110.0)));
    assert!(!book.is_crossed());
}

#[test]
fn incoming_walks_levels_best_first_and_rests_remainder() {
    let mut book = OrderBook::new();
    match_incoming(&mut book, order(95.0, 3, Side::Sell));
    match_incoming(&mut book, order(96.0, 4, Side::Sell));
    match_incoming(&mut book, order(97.0, 5, Side::Sell));

    let outcome = match_incoming(&mut book, order(96.0, 10, Side::Buy));
    assert_eq!(
        outcome.executions,
        vec![record(96.0, 95.0, 3), record(96.0, 96.0, 4)]
    );

    // three units left over, resting inside the spread
    let resting = outcome.resting.expect("remainder rests");
    assert_eq!(resting.amount, 3);
    assert_eq!(book.best_bid(), Some(price(96.0)));
    assert_eq!(book.best_ask(), Some(price(97.0)));
    assert!(!book.is_crossed());
}

#[test]
fn partial_fill_keeps_head_time_priority() {
    let mut book = OrderBook::new();
    let first = order(100.0, 5, Side::Sell);
    let second = order(100.0, 5, Side::Sell);
    match_incoming(&mut book, first);
    match_incoming(&mut book, second);

    // Nibble the head; it must stay at the front with its reduced amount.
    match_incoming(&mut book, order(100.0, 3, Side::Buy));
    let (_, head) = book.best_opposite(Side::Buy).expect("resting ask");
    assert_eq!(head.id, first.id);
    assert_eq!(head.amount, 2);

    // The next fill drains the old head before touching order two.
    let outcome = match_incoming(&mut book, order(100.0, 4, Side::Buy));
    assert_eq!(
        outcome.executions,
        vec![record(100.0, 100.0, 2), record(100.0, 100.0, 2)]
    );
    let (_, head) = book.best_opposite(Side::Buy).expect("resting ask");
    assert_eq!(head.id, second.id);
    assert_eq!(head.amount, 3);
}

#[test]
fn amounts_are_conserved_across_a_mixed_sequence() {
    let mut book = OrderBook::new();
    let sequence = [
        (100.0, 10, Side::Buy),
        (101.0, 5, Side::Buy),
        (98.0, 12, Side::Sell),
        (99.0, 7, Side::Buy),
        (100.0, 6, Side::Sell),
        (97.0, 3, Side::Sell),
        (102.0, 8, Side::Buy),
    ];

    let mut submitted_buy = 0u64;
    let mut submitted_sell = 0u64;
    let mut matched = 0u64;

    for (p, amount, side) in sequence {
        match side {
            Side::Buy => submitted_buy += u64::from(amount),
            Side::Sell => submitted_sell += u64::from(amount),
        }
        let outcome = match_incoming(&mut book, order(p, amount, side));
        matched += outcome
            .executions
            .iter()
            .map(|r| u64::from(r.amount))
            .sum::<u64>();
        assert!(!book.is_crossed());
    }

    assert_eq!(submitted_buy, book.resting_amount(Side::Buy) + matched);
    assert_eq!(submitted_sell, book.resting_amount(Side::Sell) + matched);
}

#[test]
fn depth_query_is_idempotent() {
    let mut book = OrderBook::new();
    match_incoming(&mut book, order(100.0, 10, Side::Buy));
    match_incoming(&mut book, order(99.0, 5, Side::Buy));
    match_incoming(&mut book, order(103.0, 7, Side::Sell));

    assert_eq!(book.depth(10), book.depth(10));
}

#[test]
fn depth_truncates_and_orders_most_favorable_first() {
    let mut book = OrderBook::new();
    for i in 0..15u32 {
        match_incoming(&mut book, order(100.0 - f64::from(i), 1, Side::Buy));
        match_incoming(&mut book, order(200.0 + f64::from(i), 1, Side::Sell));
    }

    let depth = book.depth(10);
    assert_eq!(depth.bids.len(), 10);
    assert_eq!(depth.asks.len(), 10);
    assert_eq!(depth.bids[0].price, price(100.0));
    assert_eq!(depth.bids[9].price, price(91.0));
    assert_eq!(depth.asks[0].price, price(200.0));
    assert_eq!(depth.asks[9].price, price(209.0));
}

#[test]
fn level_aggregates_every_order_in_the_queue() {
    let mut book = OrderBook::new();
    match_incoming(&mut book, order(100.0, 4, Side::Buy));
    match_incoming(&mut book, order(100.0, 6, Side::Buy));

    let depth = book.depth(1);
    assert_eq!(depth.bids[0].amount, 10);
}
