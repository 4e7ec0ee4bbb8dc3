//! Display formatting for monetary amounts.
//!
//! Prices and totals are plain `f64` values; the only currency policy in
//! the system is this display format, shared by the API responses and the
//! PDF renderer so line amounts and the grand total always agree.

/// Format an amount with thousands separators and two decimal places.
///
/// Uses the default round-to-nearest of `f64` formatting.
///
/// # Examples
///
/// ```
/// use driftwood_core::format_amount;
///
/// assert_eq!(format_amount(0.0), "0.00");
/// assert_eq!(format_amount(1234567.891), "1,234,567.89");
/// assert_eq!(format_amount(-45.5), "-45.50");
/// ```
#[must_use]
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
