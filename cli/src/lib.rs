//! Plain-text rendering for the board and detail views.
//!
//! Kept out of `main.rs` so the line formats stay unit-testable without a
//! network.

use xcp420_backend_client::DEFAULT_TX_VBYTES;
use xcp420_backend_client::MempoolEvent;
use xcp420_backend_client::MintPage;
use xcp420_backend_client::PriceQuotes;
use xcp420_backend_client::btc_tx_fee;
use xcp420_backend_client::xcp_usd_price;
use xcp420_format::blocks_to_duration;
use xcp420_format::format_number;
use xcp420_format::format_price;
use xcp420_models::Fairminter;
use xcp420_models::MintTotals;
use xcp420_models::MinterStatus;
use xcp420_models::to_units;
use xcp420_standard::ComplianceGrade;
use xcp420_standard::classify;
use xcp420_standard::matches_burn_spec;

/// Badge printed before the asset name.
pub fn grade_badge(grade: ComplianceGrade) -> &'static str {
    match grade {
        ComplianceGrade::Strict => "[420]",
        ComplianceGrade::Loose => "[420~]",
        ComplianceGrade::NonCompliant => "",
    }
}

/// Relative time since a closed campaign's last block, from unix seconds.
pub fn ended_ago(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("Ended {days} days ago")
    } else if hours > 0 {
        format!("Ended {hours} hours ago")
    } else if minutes > 0 {
        format!("Ended {minutes} mins ago")
    } else {
        "Just ended".to_string()
    }
}

/// Lifecycle phrase for one campaign at the given chain height.
pub fn time_display(f: &Fairminter, current_block: i64, now_unix: i64) -> String {
    match f.status {
        MinterStatus::Open if f.end_block > current_block => {
            format!("Ends in {}", blocks_to_duration(f.end_block - current_block))
        }
        MinterStatus::Pending if f.start_block > current_block => {
            format!("Starts in {}", blocks_to_duration(f.start_block - current_block))
        }
        MinterStatus::Closed => ended_ago(now_unix - f.block_time),
        // Open past its end block, or pending already startable: the indexer
        // just has not rolled the status yet.
        _ => String::new(),
    }
}

/// Whether a campaign belongs on the board under the requested filters.
pub fn on_board(f: &Fairminter, standard_only: bool, burn_spec_only: bool) -> bool {
    if standard_only && !classify(f).is_compliant() {
        return false;
    }
    if burn_spec_only && !matches_burn_spec(f) {
        return false;
    }
    true
}

/// One line per pending fairmint in the mempool. The indexer guarantees
/// neither field.
pub fn mempool_line(event: &MempoolEvent) -> String {
    let asset = event
        .params
        .as_ref()
        .and_then(|p| p.asset.as_deref())
        .unwrap_or("????");
    let tx_hash = event.tx_hash.as_deref().unwrap_or("(unconfirmed)");
    format!("{asset:<16} {tx_hash}")
}

/// Estimated fee for one mint transaction at the current rate.
pub fn fee_line(quotes: &PriceQuotes) -> String {
    let fee = btc_tx_fee(quotes.btc_fee_rate, DEFAULT_TX_VBYTES);
    format!(
        "mint fee  ~{fee} sats ({} sat/vB x {DEFAULT_TX_VBYTES} vB)",
        quotes.btc_fee_rate,
    )
}

/// One board row: badge, asset, price per lot in USD, caps, progress, time.
pub fn board_line(
    f: &Fairminter,
    current_block: i64,
    quotes: &PriceQuotes,
    now_unix: i64,
) -> String {
    let badge = grade_badge(classify(f));
    let lot_usd = format_price(xcp_usd_price(
        to_units(f.price),
        quotes.xcp_btc,
        quotes.btc_usd,
    ));
    let cap = format_number(to_units(f.hard_cap));
    let minted = format_number(to_units(f.earned_quantity));
    format!(
        "{badge:<6} {asset:<16} {lot_usd:>10}/lot  cap {cap:>7}  minted {minted:>7} ({progress:>5.1}%)  {time}",
        asset = f.asset,
        progress = f.progress_percent(),
        time = time_display(f, current_block, now_unix),
    )
}

/// Multi-line detail view for `show`.
pub fn detail_view(
    f: &Fairminter,
    page: &MintPage,
    current_block: i64,
    quotes: &PriceQuotes,
    now_unix: i64,
) -> String {
    let grade = classify(f);
    let totals = MintTotals::from_mints(&page.mints);
    let lot_xcp = to_units(f.price);
    let lot_usd = format_price(xcp_usd_price(lot_xcp, quotes.xcp_btc, quotes.btc_usd));
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", f.asset, grade_badge(grade)));
    out.push_str(&format!("  issuer     {}\n", f.source));
    out.push_str(&format!("  tx         {}\n", f.tx_hash));
    out.push_str(&format!(
        "  price      {lot_xcp} XCP/lot ({lot_usd}) for {} tokens\n",
        format_number(to_units(f.quantity_by_price)),
    ));
    out.push_str(&format!(
        "  caps       soft {} / hard {}\n",
        format_number(to_units(f.soft_cap)),
        format_number(to_units(f.hard_cap)),
    ));
    out.push_str(&format!(
        "  blocks     {} to {} (deadline {})\n",
        f.start_block, f.end_block, f.soft_cap_deadline_block,
    ));
    out.push_str(&format!(
        "  progress   {:.1}% minted, {} mints recorded\n",
        f.progress_percent(),
        page.total,
    ));
    out.push_str(&format!(
        "  this page  {} earned / {} paid across {} mints\n",
        format_number(to_units(totals.earned)),
        format_number(to_units(totals.paid)),
        totals.count,
    ));
    out.push_str(&format!(
        "  status     {}\n",
        time_display(f, current_block, now_unix),
    ));
    out
}
