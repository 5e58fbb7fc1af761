//! auction-engine
//!
//! Concurrent runtime around `auction-core`: a bounded ingestion queue,
//! a pool of matching workers serialized over one book, an explicit
//! start/stop lifecycle, and a broadcast feed of executed matches.

pub mod config;
pub mod engine;
pub mod sink;

// internal module, not re-exported
mod worker;

pub use auction_core::{
    BookDepth, MatchRecord, OrderId, OrderRequest, Price, PriceLevel, RejectReason, Side,
    SubmitError,
};
pub use config::{ConfigError, EngineConfig};
pub use engine::AuctionEngine;
pub use sink::{MatchFeed, MatchSink};
