//! Display formatting for engine outputs.
//!
//! Nothing here feeds back into the arithmetic. Non-finite values (the
//! division-by-zero outcomes the engine lets through) render as [`NOT_AVAILABLE`].

/// Label used for NaN and infinite values.
pub const NOT_AVAILABLE: &str = "N/A";

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Prefix a minus sign unless the rendered magnitude is all zeros.
fn signed(value: f64, body: String) -> String {
    let non_zero = body.chars().any(|c| c.is_ascii_digit() && c != '0');
    if value.is_sign_negative() && non_zero {
        format!("-{body}")
    } else {
        body
    }
}

/// Format a reference-currency amount in compact form (`$1.5M`, `$2.5k`, `$42`).
///
/// Thresholds compare the absolute value: exactly 1,000 is `$1.0k` and exactly
/// 1,000,000 is `$1.0M`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let abs = value.abs();
    let body = if abs >= MILLION {
        format!("${:.1}M", abs / MILLION)
    } else if abs >= THOUSAND {
        format!("${:.1}k", abs / THOUSAND)
    } else {
        format!("${:.0}", abs)
    };
    signed(value, body)
}

/// Format an amount already expressed in millions (`$29.65M`).
pub fn format_millions(value_millions: f64) -> String {
    if !value_millions.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    signed(value_millions, format!("${:.2}M", value_millions.abs()))
}

/// Format a fraction as a percentage with one decimal (`0.3373` → `33.7%`).
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    signed(fraction, format!("{:.1}%", fraction.abs() * 100.0))
}

/// Format a multiple with two decimals (`10.1174` → `10.12x`).
pub fn format_multiple(multiple: f64) -> String {
    if !multiple.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.2}x", multiple)
}

/// Axis label for a fractional rate: whole percents print bare (`40%`),
/// anything else keeps one decimal (`22.5%`).
pub fn format_rate_label(rate: f64) -> String {
    if !rate.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let pct = rate * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{:.0}%", pct.round())
    } else {
        format!("{:.1}%", pct)
    }
}
