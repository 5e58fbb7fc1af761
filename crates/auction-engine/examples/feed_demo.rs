//! Submit a burst of orders, stream the match feed, and print the book.
//!
//! Run with:
//!     RUST_LOG=info cargo run -p auction-engine --example feed_demo

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use auction_engine::{AuctionEngine, EngineConfig, OrderRequest, Side};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = EngineConfig::from_env()?;
    let depth_levels = config.depth_levels;
    let engine = Arc::new(AuctionEngine::start(config));

    // Stream executions off the feed as they happen.
    let mut feed = engine.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(record) = feed.recv().await {
            println!(
                "matched {} units @ buy {} / sell {}",
                record.amount, record.buy_price, record.sell_price
            );
        }
    });

    // A ladder of asks, then bids that cross into it.
    for i in 0..5u32 {
        engine
            .submit(OrderRequest {
                price: 100.0 + f64::from(i),
                amount: 10,
                side: Side::Sell,
            })
            .await?;
    }
    for _ in 0..3 {
        engine
            .submit(OrderRequest {
                price: 101.0,
                amount: 8,
                side: Side::Buy,
            })
            .await?;
    }

    // Give the workers a beat to drain the queue.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let depth = engine.top_of_book(depth_levels);
    println!("bids:");
    for level in &depth.bids {
        println!("  {} x {}", level.price, level.amount);
    }
    println!("asks:");
    for level in &depth.asks {
        println!("  {} x {}", level.price, level.amount);
    }
    println!("latest matches: {:?}", engine.latest_matches(5));

    engine.shutdown().await;
    printer.abort();
    Ok(())
}
