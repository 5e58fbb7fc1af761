//! auction-core
//!
//! Pure matching logic for a single-instrument continuous double auction:
//! - boundary types (requests, rejections)
//! - price-time order book
//! - the matching step
//! - append-only match ledger
//! - aggregated depth views

pub mod depth;
pub mod error;
pub mod ledger;
pub mod matching;
pub mod order;
pub mod order_book;
pub mod price;
pub mod side;

pub use depth::{BookDepth, PriceLevel};
pub use error::{RejectReason, SubmitError};
pub use ledger::{MatchLedger, MatchRecord};
pub use matching::{match_incoming, MatchOutcome};
pub use order::{Order, OrderId, OrderRequest};
pub use order_book::OrderBook;
pub use price::Price;
pub use side::Side;
