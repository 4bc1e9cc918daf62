//! Burn-spec matcher: campaigns whose caps are denominated in XCP burned
//! rather than in issued tokens.
//!
//! A campaign matches when payment is burned, the duration is exactly
//! 1,000 blocks, and `price * soft_cap` / `price * hard_cap` come out to
//! 420 and 1,000 XCP respectively. Products are taken in `i128` so scaled
//! 64-bit operands cannot overflow.

use crate::params;
use xcp420_models::Fairminter;

/// Soft-cap raise target, in whole XCP.
pub const BURN_SOFT_XCP: i128 = 420;
/// Hard-cap raise target, in whole XCP.
pub const BURN_HARD_XCP: i128 = 1_000;

const SATS_PER_XCP: i128 = 100_000_000;

/// Whether a fairminter's economics match the 420/1000 XCP burn spec.
pub fn matches_burn_spec(f: &Fairminter) -> bool {
    let duration_ok =
        f.end_block > 0 && f.start_block > 0 && f.duration_blocks() == params::DURATION_BLOCKS;

    let price = i128::from(f.price);
    let soft_lots = i128::from(f.soft_cap);
    let hard_lots = i128::from(f.hard_cap);

    let soft_ok = price > 0 && price * soft_lots == BURN_SOFT_XCP * SATS_PER_XCP;
    let hard_ok = price > 0 && price * hard_lots == BURN_HARD_XCP * SATS_PER_XCP;

    f.burn_payment && duration_ok && soft_ok && hard_ok
}
