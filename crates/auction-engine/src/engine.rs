//! Engine lifecycle and the operations the transport layer consumes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use auction_core::{
    BookDepth, MatchLedger, MatchRecord, Order, OrderBook, OrderId, OrderRequest, SubmitError,
};
use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::sink::MatchFeed;
use crate::worker;
use crate::worker::MatchState;

/// A running matching engine for one instrument.
///
/// Constructed with [`AuctionEngine::start`] and explicitly stopped with
/// [`AuctionEngine::shutdown`]; there is no global state, so several
/// engines (one per instrument) can run side by side in one process.
/// Share a handle across tasks by wrapping it in an `Arc`.
pub struct AuctionEngine {
    state: Arc<MatchState>,
    feed: MatchFeed,
    queue_tx: mpsc::Sender<Order>,
    accepting: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    config: EngineConfig,
}

impl AuctionEngine {
    /// Start an engine: bring up the ingestion queue, the match feed and
    /// the worker pool. Must be called from within a tokio runtime.
    pub fn start(config: EngineConfig) -> Self {
        let workers = config.workers.max(1);
        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let feed = MatchFeed::new(config.feed_capacity.max(1));

        let state = Arc::new(MatchState {
            book: Mutex::new(OrderBook::new()),
            ledger: MatchLedger::new(),
            sink: Arc::new(feed.clone()),
        });

        let queue_rx: worker::SharedQueue = Arc::new(tokio::sync::Mutex::new(queue_rx));
        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            handles.push(tokio::spawn(worker::run_worker(
                index,
                state.clone(),
                queue_rx.clone(),
                shutdown_rx.clone(),
            )));
        }

        info!(
            workers,
            queue_capacity = config.queue_capacity,
            "auction engine started"
        );

        AuctionEngine {
            state,
            feed,
            queue_tx,
            accepting: AtomicBool::new(true),
            shutdown_tx,
            workers: Mutex::new(handles),
            config,
        }
    }

    /// Queue an order for matching.
    ///
    /// `Ok` means *queued*, not matched. While the ingestion queue is
    /// full this waits one retry slice at a time, logging every failed
    /// attempt, with no deadline of its own. Dropping the returned
    /// future while it waits abandons the order entirely; it is never
    /// enqueued behind the caller's back, and resubmitting is the caller's
    /// decision.
    pub async fn submit(&self, request: OrderRequest) -> Result<OrderId, SubmitError> {
        let order = Order::accept(request)?;
        let id = order.id;

        let mut attempt: u32 = 0;
        loop {
            if !self.accepting.load(Ordering::Acquire) {
                return Err(SubmitError::Shutdown);
            }
            match timeout(self.config.submit_retry, self.queue_tx.reserve()).await {
                Ok(Ok(permit)) => {
                    permit.send(order);
                    debug!(order = %id, "order queued");
                    return Ok(id);
                }
                Ok(Err(_)) => return Err(SubmitError::Shutdown),
                Err(_) => {
                    attempt += 1;
                    warn!(order = %id, attempt, "ingestion queue full, retrying");
                }
            }
        }
    }

    /// Best-effort snapshot of the best `levels` price levels per side.
    ///
    /// Takes the book lock only for the duration of the aggregation, so
    /// it may interleave between matching steps, which is acceptable for a
    /// display query. Empty sides come back as empty vectors.
    pub fn top_of_book(&self, levels: usize) -> BookDepth {
        self.state.book.lock().depth(levels)
    }

    /// [`top_of_book`](Self::top_of_book) at the configured default depth.
    pub fn top_of_book_default(&self) -> BookDepth {
        self.top_of_book(self.config.depth_levels)
    }

    /// The complete match history, oldest first.
    pub fn match_history(&self) -> Vec<MatchRecord> {
        self.state.ledger.history()
    }

    /// The `limit` most recent matches (the whole history if `limit`
    /// reaches or exceeds its length).
    pub fn latest_matches(&self, limit: usize) -> Vec<MatchRecord> {
        self.state.ledger.latest(limit)
    }

    /// Subscribe to the per-match event feed.
    pub fn subscribe(&self) -> broadcast::Receiver<MatchRecord> {
        self.feed.subscribe()
    }

    /// Stop the engine.
    ///
    /// New submissions fail with [`SubmitError::Shutdown`] immediately;
    /// workers stop dequeuing but finish any step already in progress,
    /// so the book is never left half-updated. Orders still queued are
    /// dropped; resting orders stay in the book. Waits up to the
    /// configured grace period for the pool to stop. Idempotent.
    pub async fn shutdown(&self) {
        let was_accepting = self.accepting.swap(false, Ordering::AcqRel);
        if !was_accepting {
            return;
        }
        info!("auction engine shutting down");
        let _ = self.shutdown_tx.send(true);

        let handles = std::mem::take(&mut *self.workers.lock());
        let deadline = Instant::now() + self.config.shutdown_grace;
        for handle in handles {
            match timeout_at(deadline, handle).await {
                Ok(_) => {}
                Err(_) => {
                    warn!("matching workers did not stop within the grace period");
                    break;
                }
            }
        }
        info!("auction engine stopped");
    }
}
