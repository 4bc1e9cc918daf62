//! Data model for the Counterparty v2 fairminter API.
//!
//! Mirrors the wire shape of `/v2/fairminters` and
//! `/v2/fairminters/{tx_hash}/fairmints` responses. All economic quantities
//! are raw scaled integers (8 implicit decimals); the `*_normalized` string
//! mirrors are only present when the API is queried with `verbose=true` and
//! are display-only — compliance logic must never read them.

use serde::Deserialize;
use serde::Serialize;

/// Fixed decimal scale factor of the API's integer quantities.
pub const SCALE: i64 = 100_000_000;

/// A scaled integer quantity as a whole-token amount, for display only.
pub fn to_units(quantity: i64) -> f64 {
    quantity as f64 / SCALE as f64
}

/// Lifecycle state reported by the indexer for a fairminter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinterStatus {
    Open,
    Pending,
    Closed,
}

/// Status filter accepted by the fairminter list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Closed,
    Pending,
}

impl StatusFilter {
    /// The literal query-parameter value the API expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "pending" => Ok(Self::Pending),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

/// One fairminter (token-issuance campaign) as returned by the indexer.
///
/// Quantities are signed so that arithmetic on inconsistent upstream data
/// (e.g. `end_block < start_block`) stays well-defined instead of wrapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fairminter {
    pub tx_hash: String,
    pub tx_index: i64,
    pub block_index: i64,
    pub source: String,
    pub asset: String,
    #[serde(default)]
    pub asset_parent: Option<String>,
    #[serde(default)]
    pub asset_longname: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Price per lot, in XCP satoshis.
    pub price: i64,
    /// Issued quantity per lot, scaled.
    pub quantity_by_price: i64,
    pub hard_cap: i64,
    pub soft_cap: i64,
    pub start_block: i64,
    pub end_block: i64,
    pub burn_payment: bool,
    pub max_mint_per_tx: i64,
    pub max_mint_per_address: i64,
    pub premint_quantity: i64,
    /// Commission as a scaled fraction. Older API builds omit the field
    /// entirely, which means zero.
    #[serde(default)]
    pub minted_asset_commission_int: i64,
    pub soft_cap_deadline_block: i64,
    pub lock_description: bool,
    pub lock_quantity: bool,
    pub divisible: bool,
    #[serde(default)]
    pub pre_minted: bool,
    pub status: MinterStatus,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Total scaled quantity minted so far.
    #[serde(default)]
    pub earned_quantity: i64,
    /// Total scaled quantity paid so far.
    #[serde(default)]
    pub paid_quantity: i64,
    #[serde(default)]
    pub commission: i64,
    pub block_time: i64,
    // Normalized mirrors, present with verbose=true. Display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_cap_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_cap_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_by_price_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mint_per_tx_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mint_per_address_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premint_quantity_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned_quantity_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_quantity_normalized: Option<String>,
}

impl Fairminter {
    /// Blocks between start and end; negative when upstream data is
    /// inverted. Saturating so extreme values stay comparable instead of
    /// overflowing.
    pub fn duration_blocks(&self) -> i64 {
        self.end_block.saturating_sub(self.start_block)
    }

    /// Percentage of the hard cap minted so far, 0 when there is no cap.
    pub fn progress_percent(&self) -> f64 {
        if self.hard_cap <= 0 {
            return 0.0;
        }
        self.earned_quantity as f64 / self.hard_cap as f64 * 100.0
    }
}

/// Validity state of a recorded mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MintValidity {
    Valid,
    Invalid,
}

/// Asset metadata optionally attached to a fairmint record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfo {
    #[serde(default)]
    pub asset_longname: Option<String>,
    pub description: String,
    pub issuer: String,
    pub divisible: bool,
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// One completed mint against a fairminter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fairmint {
    pub tx_hash: String,
    pub tx_index: i64,
    pub block_index: i64,
    pub source: String,
    pub fairminter_tx_hash: String,
    pub asset: String,
    pub earn_quantity: i64,
    pub paid_quantity: i64,
    #[serde(default)]
    pub commission: i64,
    pub status: MintValidity,
    pub block_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_info: Option<AssetInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earn_quantity_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_quantity_normalized: Option<String>,
}

/// Display aggregation over the mints of one campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MintTotals {
    pub count: usize,
    pub earned: i64,
    pub paid: i64,
}

impl MintTotals {
    /// Sum valid mints; invalid ones are counted but add nothing.
    pub fn from_mints(mints: &[Fairmint]) -> Self {
        let mut totals = Self {
            count: mints.len(),
            ..Self::default()
        };
        for mint in mints {
            if mint.status == MintValidity::Valid {
                totals.earned = totals.earned.saturating_add(mint.earn_quantity);
                totals.paid = totals.paid.saturating_add(mint.paid_quantity);
            }
        }
        totals
    }
}
