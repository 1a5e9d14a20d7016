//! Shared numeric and formatting helpers
//!
//! All tax arithmetic runs at full precision; rounding happens once, when a
//! figure is rendered for the response.

use bigdecimal::{BigDecimal, RoundingMode};

/// Fractional digits carried by every rendered monetary or rate field
pub const DECIMAL_PLACES: i64 = 2;

/// Round a value to two decimals, half away from zero
pub fn round_half_away(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(DECIMAL_PLACES, RoundingMode::HalfUp)
}

/// Render a monetary value as a string with exactly two fractional digits
pub fn format_amount(value: &BigDecimal) -> String {
    let rounded = round_half_away(value);
    // never render "-0.00"
    if rounded == BigDecimal::from(0) {
        return "0.00".to_string();
    }
    rounded.to_string()
}

/// Render a fractional rate as a percentage with two decimals (0.23 -> "23.00")
pub fn format_rate(rate: &BigDecimal) -> String {
    format_amount(&(rate * BigDecimal::from(100)))
}

/// `a * (b / c)` at full precision. The caller guarantees `c` is non-zero.
pub fn prorate(total: &BigDecimal, part: &BigDecimal, whole: &BigDecimal) -> BigDecimal {
    total * (part / whole)
}
