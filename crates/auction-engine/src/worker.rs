//! Matching worker pool.
//!
//! A fixed set of workers share one bounded receiver; each worker
//! dequeues an order and runs one serialized matching step. The book
//! mutex is held across the whole step (match loop, ledger appends,
//! sink notifications), so the resulting trade sequence equals the
//! sequence of committing orders one at a time in queue-pop order, no
//! matter how many workers are dequeuing.
//!
//! Shutdown stops workers from dequeuing; a step already underway always
//! runs to completion, so the book is never abandoned half-updated.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use auction_core::{match_incoming, MatchLedger, Order, OrderBook};
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::sink::MatchSink;

/// Matching state shared by every worker.
pub(crate) struct MatchState {
    pub(crate) book: Mutex<OrderBook>,
    pub(crate) ledger: MatchLedger,
    pub(crate) sink: Arc<dyn MatchSink>,
}

/// Receiver end of the ingestion queue, shared across the pool.
pub(crate) type SharedQueue = Arc<tokio::sync::Mutex<mpsc::Receiver<Order>>>;

/// Run one worker until shutdown is signalled or the queue closes.
pub(crate) async fn run_worker(
    index: usize,
    state: Arc<MatchState>,
    queue: SharedQueue,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(worker = index, "matching worker started");
    let mut processed: u64 = 0;

    loop {
        let order = {
            let mut rx = queue.lock().await;
            tokio::select! {
                biased;
                _ = shutdown.changed() => None,
                order = rx.recv() => order,
            }
        };
        let Some(order) = order else {
            break;
        };

        step(&state, order);

        processed += 1;
        if processed % 100 == 0 {
            debug!(worker = index, processed, "worker progress");
        }
    }

    info!(worker = index, processed, "matching worker stopped");
}

/// One serialized matching step.
///
/// A panic anywhere inside the step is contained here: the step is
/// abandoned, the fault logged, and the worker moves on to the next
/// order. One bad order must not take the pool down.
fn step(state: &MatchState, order: Order) {
    let order_id = order.id;

    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut book = state.book.lock();
        let outcome = match_incoming(&mut book, order);
        for record in &outcome.executions {
            state.ledger.append(*record);
            state.sink.on_match(record);
        }
        outcome
    }));

    match result {
        Ok(outcome) => {
            debug!(
                order = %order_id,
                executions = outcome.executions.len(),
                rested = outcome.resting.is_some(),
                "order processed"
            );
        }
        Err(_) => {
            error!(order = %order_id, "matching step panicked; order abandoned");
        }
    }
}
