//! Display formatting for campaign quantities, USD prices, and block
//! distances.
//!
//! Pure and total: malformed input (NaN, infinities, negatives) renders a
//! defined fallback string instead of panicking, because these strings go
//! straight into rendered output where an error has nowhere to go.

/// Floor string used when a price is too small to print meaningfully.
pub const PRICE_FLOOR: &str = "<$0.000000000001";

/// Average Bitcoin block interval, in minutes.
const MINUTES_PER_BLOCK: i64 = 10;

/// Render a non-negative magnitude with K/M/B/T/Q suffix tiers.
///
/// Within the low sub-band of each tier (1.0–9.9) one decimal is shown;
/// above that the integer floor. Values below 1,000 print as a plain
/// integer, never in exponential notation. Non-finite or negative input
/// renders `"0"`.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() || n < 0.0 {
        return "0".to_string();
    }

    if n < 1_000.0 {
        return format!("{n:.0}");
    }
    if n < 10_000.0 {
        // 1.0K - 9.9K (9,999 rounds up to 10.0K)
        return format!("{:.1}K", n / 1_000.0);
    }
    if n < 1_000_000.0 {
        return format!("{}K", (n / 1_000.0).floor());
    }
    if n < 10_000_000.0 {
        return format!("{:.1}M", n / 1_000_000.0);
    }
    if n < 1_000_000_000.0 {
        return format!("{}M", (n / 1_000_000.0).floor());
    }
    if n < 10_000_000_000.0 {
        return format!("{:.1}B", n / 1_000_000_000.0);
    }
    if n < 1_000_000_000_000.0 {
        return format!("{}B", (n / 1_000_000_000.0).floor());
    }
    if n < 10_000_000_000_000.0 {
        return format!("{:.1}T", n / 1_000_000_000_000.0);
    }
    if n < 1_000_000_000_000_000.0 {
        return format!("{}T", (n / 1_000_000_000_000.0).floor());
    }
    if n < 10_000_000_000_000_000.0 {
        return format!("{:.1}Q", n / 1_000_000_000_000_000.0);
    }
    format!("{}Q", (n / 1_000_000_000_000_000.0).floor())
}

/// Render a USD price with precision inversely proportional to magnitude.
///
/// Sub-0.0001 values show three significant digits starting from the first
/// significant decimal, capped at 12 decimal places; anything smaller
/// renders [`PRICE_FLOOR`]. From 1,000 upward the same K/M tiering as
/// [`format_number`] applies. Zero, negative, and non-finite input render
/// `"$0"`.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price <= 0.0 {
        return "$0".to_string();
    }

    if price < 0.0001 {
        return format_tiny_price(price);
    }
    if price < 0.01 {
        return format!("${price:.4}");
    }
    if price < 1.0 {
        return format!("${price:.3}");
    }
    if price < 100.0 {
        return format!("${price:.2}");
    }
    if price < 1_000.0 {
        return format!("${price:.0}");
    }
    if price < 10_000.0 {
        return format!("${:.1}K", price / 1_000.0);
    }
    if price < 1_000_000.0 {
        return format!("${}K", (price / 1_000.0).floor());
    }
    if price < 10_000_000.0 {
        return format!("${:.1}M", price / 1_000_000.0);
    }
    format!("${}M", (price / 1_000_000.0).floor())
}

/// Count leading zero decimals and show three significant digits from the
/// first non-zero one.
fn format_tiny_price(price: f64) -> String {
    let expanded = format!("{price:.20}");
    let Some(decimals) = expanded.strip_prefix("0.") else {
        // Unreachable for finite positive price < 0.0001.
        return format!("${price:.8}");
    };

    let leading_zeros = decimals.chars().take_while(|c| *c == '0').count();
    if leading_zeros >= decimals.len() {
        return format!("${price:.8}");
    }

    let decimal_places = leading_zeros + 3;
    if decimal_places > 12 {
        return PRICE_FLOOR.to_string();
    }
    format!("${price:.decimal_places$}")
}

/// Render a block distance as a relative duration, 10 minutes per block.
///
/// Picks the coarsest unit that is at least one (days, then hours, then
/// minutes) and renders only that unit. Non-positive input renders
/// `"0 mins"`.
pub fn blocks_to_duration(blocks: i64) -> String {
    if blocks <= 0 {
        return "0 mins".to_string();
    }
    let minutes = blocks.saturating_mul(MINUTES_PER_BLOCK);
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{days} days")
    } else if hours > 0 {
        format!("{hours} hours")
    } else {
        format!("{minutes} mins")
    }
}
