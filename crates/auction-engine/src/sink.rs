//! Per-match notification fan-out.
//!
//! Every executed pairing is announced exactly once, from inside the
//! matching critical section. Implementations therefore must only hand
//! the event off (enqueue it, wake a task) and return; anything slow
//! belongs in a consumer on the far side of that hand-off.

use auction_core::MatchRecord;
use tokio::sync::broadcast;

/// Collaborator notified once per executed pairing.
pub trait MatchSink: Send + Sync {
    /// Called from inside the matching step. Must not block.
    fn on_match(&self, record: &MatchRecord);
}

/// Broadcast-channel fan-out, the engine's built-in sink.
///
/// Publishing is a non-blocking enqueue into every subscriber's buffer;
/// a subscriber that falls behind its buffer capacity loses the oldest
/// events rather than slowing matching down. External collaborators
/// subscribe here and do their slow work on their own time.
#[derive(Debug, Clone)]
pub struct MatchFeed {
    tx: broadcast::Sender<MatchRecord>,
}

impl MatchFeed {
    /// Create a feed whose subscribers each buffer up to `capacity`
    /// events.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        MatchFeed { tx }
    }

    /// Subscribe to all matches executed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<MatchRecord> {
        self.tx.subscribe()
    }
}

impl MatchSink for MatchFeed {
    fn on_match(&self, record: &MatchRecord) {
        // send only errors when nobody is subscribed; matches happen
        // with or without an audience.
        let _ = self.tx.send(*record);
    }
}
