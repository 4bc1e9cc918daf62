//! HTTP collaborators for the fairminter board.
//!
//! Three independent pieces: the Counterparty v2 API client (campaign and
//! mint records), a multi-source block-height tracker, and a price feed.
//! The tracker and feed keep short-lived in-memory caches and degrade to
//! cached or default values when every upstream fails; only the API client
//! surfaces errors to callers, because a board without campaign data has
//! nothing to render.

mod block_height;
mod client;
mod error;
mod prices;

pub use block_height::BlockHeightTracker;
pub use block_height::FALLBACK_BLOCK_HEIGHT;
pub use client::CounterpartyClient;
pub use client::DEFAULT_API_BASE;
pub use client::MempoolEvent;
pub use client::MempoolEventParams;
pub use client::MintPage;
pub use error::BackendError;
pub use error::Result;
pub use prices::DEFAULT_TX_VBYTES;
pub use prices::PriceFeed;
pub use prices::PriceQuotes;
pub use prices::btc_tx_fee;
pub use prices::xcp_usd_price;
