//! Current Bitcoin block height, reconciled across three public sources.
//!
//! Counterparty, mempool.space, and blockstream.info are queried
//! concurrently; the median of the successful answers wins so that one
//! lagging or lying source cannot skew the result. The height is cached for
//! five minutes. If every source fails, the last cached value is served, or
//! a fixed fallback when nothing was ever fetched.

use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::BackendError;
use crate::error::Result;

/// Served when no source has ever answered.
pub const FALLBACK_BLOCK_HEIGHT: u64 = 914_955;

const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

const COUNTERPARTY_BASE: &str = "https://api.counterparty.io:4000/v2";
const MEMPOOL_BASE: &str = "https://mempool.space";
const BLOCKSTREAM_BASE: &str = "https://blockstream.info";

#[derive(Debug, Deserialize)]
struct BlocksEnvelope {
    result: Vec<BlockRow>,
}

#[derive(Debug, Deserialize)]
struct BlockRow {
    block_index: u64,
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    height: u64,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct BlockHeightTracker {
    http: reqwest::Client,
    counterparty_base: String,
    mempool_base: String,
    blockstream_base: String,
    cache: Mutex<Option<CacheEntry>>,
}

impl Default for BlockHeightTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockHeightTracker {
    pub fn new() -> Self {
        Self::with_bases(COUNTERPARTY_BASE, MEMPOOL_BASE, BLOCKSTREAM_BASE)
    }

    /// Point every source at explicit base URLs; used by tests.
    pub fn with_bases(
        counterparty: impl Into<String>,
        mempool: impl Into<String>,
        blockstream: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            counterparty_base: counterparty.into(),
            mempool_base: mempool.into(),
            blockstream_base: blockstream.into(),
            cache: Mutex::new(None),
        }
    }

    /// The current block height. Never fails: degrades to the cached value,
    /// then to [`FALLBACK_BLOCK_HEIGHT`].
    pub async fn current(&self) -> u64 {
        let previous = {
            let cache = self.cache.lock().await;
            if let Some(entry) = *cache {
                if entry.fetched_at.elapsed() < CACHE_TTL {
                    return entry.height;
                }
            }
            cache.map(|entry| entry.height)
        };

        let (counterparty, mempool, blockstream) = tokio::join!(
            self.source("counterparty", self.from_counterparty()),
            self.source("mempool.space", self.from_mempool()),
            self.source("blockstream", self.from_blockstream()),
        );

        let mut heights: Vec<u64> = [counterparty, mempool, blockstream]
            .into_iter()
            .flatten()
            .collect();

        let Some(height) = median(&mut heights) else {
            return previous.unwrap_or(FALLBACK_BLOCK_HEIGHT);
        };

        let mut cache = self.cache.lock().await;
        *cache = Some(CacheEntry {
            height,
            fetched_at: Instant::now(),
        });
        height
    }

    async fn source(&self, name: &str, fetch: impl Future<Output = Result<u64>>) -> Option<u64> {
        match fetch.await {
            Ok(height) => Some(height),
            Err(err) => {
                warn!("block height source {name} failed: {err}");
                None
            }
        }
    }

    async fn from_counterparty(&self) -> Result<u64> {
        let url = format!("{}/blocks?limit=1", self.counterparty_base);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::UnexpectedStatus {
                endpoint: url,
                status,
            });
        }
        let envelope: BlocksEnvelope =
            response
                .json()
                .await
                .map_err(|err| BackendError::MalformedResponse {
                    endpoint: url.clone(),
                    message: err.to_string(),
                })?;
        envelope
            .result
            .first()
            .map(|row| row.block_index)
            .ok_or(BackendError::MalformedResponse {
                endpoint: url,
                message: "empty block list".to_string(),
            })
    }

    async fn from_mempool(&self) -> Result<u64> {
        let url = format!("{}/api/blocks/tip/height", self.mempool_base);
        self.tip_height(&url).await
    }

    async fn from_blockstream(&self) -> Result<u64> {
        let url = format!("{}/api/blocks/tip/height", self.blockstream_base);
        self.tip_height(&url).await
    }

    /// Both explorers serve the tip height as a bare decimal body.
    async fn tip_height(&self, url: &str) -> Result<u64> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::UnexpectedStatus {
                endpoint: url.to_string(),
                status,
            });
        }
        let body = response.text().await?;
        body.trim()
            .parse()
            .map_err(|_| BackendError::MalformedResponse {
                endpoint: url.to_string(),
                message: format!("not a block height: {body:?}"),
            })
    }
}

/// Median of the collected heights; upper median for even counts.
fn median(heights: &mut [u64]) -> Option<u64> {
    if heights.is_empty() {
        return None;
    }
    heights.sort_unstable();
    Some(heights[heights.len() / 2])
}
