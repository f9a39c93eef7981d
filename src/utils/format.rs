//! Number formatting for result panels

/// Placeholder shown for values that cannot be displayed
pub const MISSING_VALUE: &str = "—";

/// Format `value` with a fixed number of decimals
///
/// Non-finite values render as an em dash so that a panel never shows
/// `NaN` or `inf`.
#[must_use]
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        MISSING_VALUE.to_string()
    }
}

/// Format an optional value, rendering `None` like a non-finite one
#[must_use]
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| format_number(v, decimals))
}

/// Format a usage count with thousands separators, `None` as a placeholder
#[must_use]
pub fn format_count(count: Option<u64>) -> String {
    let Some(count) = count else {
        return MISSING_VALUE.to_string();
    };
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
