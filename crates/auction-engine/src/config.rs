//! Configuration for one engine instance.
//!
//! For now this is intentionally simple: you can either use defaults
//! or override via a few environment variables:
//!
//! - `AUCTION_QUEUE_CAPACITY`    (default: 10000)
//! - `AUCTION_WORKERS`           (default: host parallelism)
//! - `AUCTION_SUBMIT_RETRY_MS`   (default: 500)
//! - `AUCTION_DEPTH_LEVELS`      (default: 10)
//! - `AUCTION_FEED_CAPACITY`     (default: 1024)
//! - `AUCTION_SHUTDOWN_GRACE_MS` (default: 5000)

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// A configuration value that could not be parsed.
#[derive(Debug, Error)]
#[error("invalid value for {key}: {message}")]
pub struct ConfigError {
    key: &'static str,
    message: String,
}

/// Tunables for one engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Capacity of the ingestion queue between submitters and workers.
    pub queue_capacity: usize,

    /// Number of matching workers.
    pub workers: usize,

    /// How long one enqueue attempt may wait before it is logged as
    /// backpressure and retried.
    pub submit_retry: Duration,

    /// Number of price levels a top-of-book query returns by default.
    pub depth_levels: usize,

    /// Per-subscriber buffer of the match event feed. Subscribers that
    /// fall further behind than this lose the oldest events.
    pub feed_capacity: usize,

    /// How long `shutdown` waits for workers to finish in-flight steps.
    pub shutdown_grace: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            queue_capacity: 10_000,
            workers: num_cpus::get(),
            submit_retry: Duration::from_millis(500),
            depth_levels: 10,
            feed_capacity: 1024,
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

impl EngineConfig {
    /// Construct a config from environment variables, falling back to
    /// the defaults above.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();
        Ok(EngineConfig {
            queue_capacity: read_env_or_default("AUCTION_QUEUE_CAPACITY", defaults.queue_capacity)?,
            workers: read_env_or_default("AUCTION_WORKERS", defaults.workers)?,
            submit_retry: Duration::from_millis(read_env_or_default(
                "AUCTION_SUBMIT_RETRY_MS",
                500u64,
            )?),
            depth_levels: read_env_or_default("AUCTION_DEPTH_LEVELS", defaults.depth_levels)?,
            feed_capacity: read_env_or_default("AUCTION_FEED_CAPACITY", defaults.feed_capacity)?,
            shutdown_grace: Duration::from_millis(read_env_or_default(
                "AUCTION_SHUTDOWN_GRACE_MS",
                5_000u64,
            )?),
        })
    }
}

fn read_env_or_default<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().map_err(|e| ConfigError {
            key,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
