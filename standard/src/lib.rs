//! XCP-420 standard verification.
//!
//! Grades a fairminter against the fixed XCP-420 issuance terms. All checks
//! compare the raw scaled integers from the indexer; the `*_normalized`
//! decimal strings are never consulted because their parsing is not
//! guaranteed bit-exact across records.

use serde::Deserialize;
use serde::Serialize;
use xcp420_models::Fairminter;

mod burn_spec;

pub use burn_spec::matches_burn_spec;

/// Fixed XCP-420 issuance terms, as scaled integers (8 implicit decimals).
pub mod params {
    /// 10,000,000 tokens.
    pub const HARD_CAP: i64 = 1_000_000_000_000_000;
    /// 4,200,000 tokens.
    pub const SOFT_CAP: i64 = 420_000_000_000_000;
    /// 0.1 XCP per lot, in satoshis.
    pub const PRICE: i64 = 10_000_000;
    /// 1,000 tokens per lot.
    pub const QUANTITY_BY_PRICE: i64 = 100_000_000_000;
    /// 35,000 tokens, the largest strict per-address allowance.
    pub const MAX_MINT_PER_ADDRESS: i64 = 3_500_000_000_000;
    /// Exactly 1,000 blocks (~7 days).
    pub const DURATION_BLOCKS: i64 = 1000;
    /// How far before `end_block` the soft-cap deadline may sit and still
    /// count as core-compliant. The strict grade requires exactly
    /// `end_block - 1`. TODO: revisit the 100-block tolerance once enough
    /// loose-graded campaigns exist to measure what tools actually emit.
    pub const SOFT_CAP_DEADLINE_WINDOW: i64 = 100;
}

/// Compliance grade of one fairminter against the XCP-420 terms.
///
/// `Loose` covers campaigns that match every economic term but have relaxed
/// or missing per-address limits or an inexact soft-cap deadline — mostly
/// campaigns created before the per-address convention existed, or where the
/// issuing tool left the limit unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceGrade {
    Strict,
    Loose,
    NonCompliant,
}

impl ComplianceGrade {
    /// Whether the campaign belongs on the standard board at all.
    pub fn is_compliant(self) -> bool {
        !matches!(self, Self::NonCompliant)
    }
}

/// Grade a fairminter against the XCP-420 standard.
///
/// Total over any well-typed record: pathological values (zeroes, inverted
/// block ranges, deadlines after the end block) grade `NonCompliant` rather
/// than panicking. Pure — same record, same grade.
pub fn classify(fairminter: &Fairminter) -> ComplianceGrade {
    if !passes_core_gate(fairminter) {
        return ComplianceGrade::NonCompliant;
    }
    if passes_strict_refinement(fairminter) {
        ComplianceGrade::Strict
    } else {
        ComplianceGrade::Loose
    }
}

/// Phase one: the mandatory economic terms.
///
/// Every fixed term must match exactly and the soft-cap deadline must fall
/// inside the loose window before `end_block`. Per-address limits are not
/// examined here.
pub fn passes_core_gate(f: &Fairminter) -> bool {
    // Saturating: an absurd upstream deadline must grade false, not panic.
    let deadline_in_window = f.soft_cap_deadline_block < f.end_block
        && f.end_block.saturating_sub(f.soft_cap_deadline_block)
            <= params::SOFT_CAP_DEADLINE_WINDOW;

    f.hard_cap == params::HARD_CAP
        && f.soft_cap == params::SOFT_CAP
        && f.price == params::PRICE
        && f.quantity_by_price == params::QUANTITY_BY_PRICE
        && f.duration_blocks() == params::DURATION_BLOCKS
        && deadline_in_window
        && f.burn_payment
        && f.lock_quantity
        && f.divisible
        && f.premint_quantity == 0
        && f.minted_asset_commission_int == 0
}

/// Phase two: the strict per-address and deadline refinement.
///
/// Only meaningful after [`passes_core_gate`]: requires a per-address limit
/// of at most 35,000 tokens, the per-tx limit equal to it (the whole
/// allowance must be spendable in one transaction), and the soft-cap
/// deadline at exactly `end_block - 1`.
pub fn passes_strict_refinement(f: &Fairminter) -> bool {
    f.max_mint_per_address > 0
        && f.max_mint_per_address <= params::MAX_MINT_PER_ADDRESS
        && f.max_mint_per_tx == f.max_mint_per_address
        && f.soft_cap_deadline_block == f.end_block.saturating_sub(1)
}
