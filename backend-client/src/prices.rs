//! Price quotes: XCP/BTC last trade, BTC/USD, and the recommended fee rate.
//!
//! Each quote comes from a different third party with its own response
//! shape, so the bodies are probed as loose JSON the way a browser client
//! would, rather than modeled strictly. One shared five-minute cache covers
//! all three; a field that cannot be refreshed keeps its last value, and a
//! field that never loaded falls back to a fixed default.

use std::time::Duration;
use std::time::Instant;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::BackendError;
use crate::error::Result;

/// Conservative defaults used until the first successful fetch.
const DEFAULT_XCP_BTC: f64 = 0.00004;
const DEFAULT_BTC_USD: f64 = 100_000.0;
const DEFAULT_FEE_RATE: u64 = 10;

/// Assumed size of a fairmint transaction, in vbytes.
pub const DEFAULT_TX_VBYTES: u64 = 250;

const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

const DEX_TRADE_BASE: &str = "https://api.dex-trade.com";
const COINBASE_BASE: &str = "https://api.coinbase.com";
const BINANCE_BASE: &str = "https://api.binance.com";
const MEMPOOL_BASE: &str = "https://mempool.space";

/// One consistent snapshot of the quotes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuotes {
    /// XCP/BTC last trade price.
    pub xcp_btc: f64,
    /// BTC/USD spot price.
    pub btc_usd: f64,
    /// Medium-priority fee rate, sats/vbyte.
    pub btc_fee_rate: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    xcp_btc: Option<f64>,
    btc_usd: Option<f64>,
    fee_rate: Option<u64>,
    fetched_at: Option<Instant>,
}

#[derive(Debug)]
pub struct PriceFeed {
    http: reqwest::Client,
    dex_trade_base: String,
    coinbase_base: String,
    binance_base: String,
    mempool_base: String,
    cache: Mutex<CacheState>,
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceFeed {
    pub fn new() -> Self {
        Self::with_bases(DEX_TRADE_BASE, COINBASE_BASE, BINANCE_BASE, MEMPOOL_BASE)
    }

    /// Point every source at explicit base URLs; used by tests.
    pub fn with_bases(
        dex_trade: impl Into<String>,
        coinbase: impl Into<String>,
        binance: impl Into<String>,
        mempool: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            dex_trade_base: dex_trade.into(),
            coinbase_base: coinbase.into(),
            binance_base: binance.into(),
            mempool_base: mempool.into(),
            cache: Mutex::new(CacheState::default()),
        }
    }

    /// Current quotes. Never fails: stale fields keep their last value and
    /// unfetched fields use the defaults.
    pub async fn quotes(&self) -> PriceQuotes {
        {
            let cache = self.cache.lock().await;
            if let Some(fetched_at) = cache.fetched_at {
                let complete = cache.xcp_btc.is_some() && cache.btc_usd.is_some();
                if complete && fetched_at.elapsed() < CACHE_TTL {
                    return snapshot(&cache);
                }
            }
        }

        let (xcp_btc, btc_usd, fee_rate) = tokio::join!(
            self.source("xcp/btc", self.fetch_xcp_btc()),
            self.source("btc/usd", self.fetch_btc_usd()),
            self.source("fee rate", self.fetch_fee_rate()),
        );

        let mut cache = self.cache.lock().await;
        if xcp_btc.is_some() {
            cache.xcp_btc = xcp_btc;
        }
        if btc_usd.is_some() {
            cache.btc_usd = btc_usd;
        }
        if fee_rate.is_some() {
            cache.fee_rate = fee_rate;
        }
        cache.fetched_at = Some(Instant::now());
        snapshot(&cache)
    }

    async fn source<T>(&self, name: &str, fetch: impl Future<Output = Result<T>>) -> Option<T> {
        match fetch.await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("price source {name} failed: {err}");
                None
            }
        }
    }

    async fn fetch_xcp_btc(&self) -> Result<f64> {
        let url = format!(
            "{}/v1/public/ticker?pair=XCPBTC",
            self.dex_trade_base
        );
        let body = self.get_json(&url).await?;
        let ok = body.get("status").and_then(Value::as_bool).unwrap_or(false);
        let last = body.get("data").and_then(|data| data.get("last"));
        match (ok, last.and_then(lenient_f64)) {
            (true, Some(price)) => Ok(price),
            _ => Err(malformed(&url, "missing data.last")),
        }
    }

    async fn fetch_btc_usd(&self) -> Result<f64> {
        // Coinbase first, Binance as fallback.
        let url = format!("{}/v2/exchange-rates?currency=BTC", self.coinbase_base);
        match self.get_json(&url).await.and_then(|body| {
            body.get("data")
                .and_then(|data| data.get("rates"))
                .and_then(|rates| rates.get("USD"))
                .and_then(lenient_f64)
                .ok_or(malformed(&url, "missing data.rates.USD"))
        }) {
            Ok(price) => return Ok(price),
            Err(err) => warn!("coinbase btc/usd failed, trying binance: {err}"),
        }

        let url = format!(
            "{}/api/v3/ticker/price?symbol=BTCUSDT",
            self.binance_base
        );
        let body = self.get_json(&url).await?;
        body.get("price")
            .and_then(lenient_f64)
            .ok_or(malformed(&url, "missing price"))
    }

    async fn fetch_fee_rate(&self) -> Result<u64> {
        let url = format!("{}/api/v1/fees/recommended", self.mempool_base);
        let body = self.get_json(&url).await?;
        let rate = body
            .get("halfHourFee")
            .and_then(Value::as_u64)
            .or_else(|| body.get("hourFee").and_then(Value::as_u64))
            .unwrap_or(DEFAULT_FEE_RATE);
        Ok(rate)
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::UnexpectedStatus {
                endpoint: url.to_string(),
                status,
            });
        }
        response
            .json()
            .await
            .map_err(|err| BackendError::MalformedResponse {
                endpoint: url.to_string(),
                message: err.to_string(),
            })
    }
}

fn snapshot(cache: &CacheState) -> PriceQuotes {
    PriceQuotes {
        xcp_btc: cache.xcp_btc.unwrap_or(DEFAULT_XCP_BTC),
        btc_usd: cache.btc_usd.unwrap_or(DEFAULT_BTC_USD),
        btc_fee_rate: cache.fee_rate.unwrap_or(DEFAULT_FEE_RATE),
    }
}

fn malformed(endpoint: &str, message: &str) -> BackendError {
    BackendError::MalformedResponse {
        endpoint: endpoint.to_string(),
        message: message.to_string(),
    }
}

/// Exchanges quote numbers either as JSON numbers or as decimal strings.
fn lenient_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

/// USD value of an XCP amount via the BTC leg.
pub fn xcp_usd_price(xcp_amount: f64, xcp_btc: f64, btc_usd: f64) -> f64 {
    xcp_amount * xcp_btc * btc_usd
}

/// Transaction fee in satoshis for a given rate and size.
pub fn btc_tx_fee(fee_rate: u64, tx_vbytes: u64) -> u64 {
    fee_rate.saturating_mul(tx_vbytes)
}
