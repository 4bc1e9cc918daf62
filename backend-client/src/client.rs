//! Counterparty v2 API client.
//!
//! All endpoints are queried with `verbose=true` so the records carry their
//! normalized display mirrors. Responses arrive wrapped in a
//! `{"result": ...}` envelope, with an optional `result_count` on list
//! endpoints.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use xcp420_models::Fairmint;
use xcp420_models::Fairminter;
use xcp420_models::StatusFilter;

use crate::error::BackendError;
use crate::error::Result;

pub const DEFAULT_API_BASE: &str = "https://api.counterparty.io:4000/v2";

/// Default page size for the fairminter list, matching the board view.
const LIST_LIMIT: u32 = 200;
/// Page size for per-campaign mint listings.
const MINTS_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
    #[serde(default)]
    result_count: Option<u64>,
}

/// One page of mints for a campaign, with the total count reported by the
/// indexer (which may exceed the page length).
#[derive(Debug, Clone)]
pub struct MintPage {
    pub mints: Vec<Fairmint>,
    pub total: u64,
}

/// A pending fairmint observed in the mempool. The indexer only guarantees
/// the envelope; both fields can be missing.
#[derive(Debug, Clone, Deserialize)]
pub struct MempoolEvent {
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub params: Option<MempoolEventParams>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MempoolEventParams {
    #[serde(default)]
    pub asset: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CounterpartyClient {
    http: reqwest::Client,
    base: String,
}

impl Default for CounterpartyClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl CounterpartyClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// Fetch fairminters filtered by lifecycle status, newest first.
    pub async fn fairminters(&self, status: StatusFilter) -> Result<Vec<Fairminter>> {
        let url = format!(
            "{}/fairminters?status={status}&limit={LIST_LIMIT}&verbose=true",
            self.base
        );
        Ok(self.get_envelope(&url).await?.result)
    }

    /// Fetch a single fairminter by its issuance transaction hash.
    pub async fn fairminter(&self, tx_hash: &str) -> Result<Fairminter> {
        let url = format!("{}/fairminters/{tx_hash}?verbose=true", self.base);
        Ok(self.get_envelope(&url).await?.result)
    }

    /// Fetch the recorded mints of one campaign.
    pub async fn fairmints_for(&self, tx_hash: &str) -> Result<MintPage> {
        let url = format!(
            "{}/fairminters/{tx_hash}/fairmints?verbose=true&limit={MINTS_LIMIT}",
            self.base
        );
        let envelope: Envelope<Vec<Fairmint>> = self.get_envelope(&url).await?;
        let total = envelope
            .result_count
            .unwrap_or(envelope.result.len() as u64);
        Ok(MintPage {
            mints: envelope.result,
            total,
        })
    }

    /// Fairmints currently sitting in the mempool, truncated to `limit`.
    pub async fn mempool_fairmints(&self, limit: usize) -> Result<Vec<MempoolEvent>> {
        let url = format!("{}/mempool/events/NEW_FAIRMINT", self.base);
        let envelope: Envelope<Vec<MempoolEvent>> = self.get_envelope(&url).await?;
        let mut events = envelope.result;
        events.truncate(limit);
        Ok(events)
    }

    async fn get_envelope<T: DeserializeOwned>(&self, url: &str) -> Result<Envelope<T>> {
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
