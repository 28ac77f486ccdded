//! Lenient parsing for decimal-string form fields.
//!
//! Numeric form fields (price, stock, weight) travel as decimal strings to
//! avoid precision loss across the form/API boundary. These helpers parse
//! them for validation without ever rewriting the stored string.

use rust_decimal::Decimal;

/// Parse a decimal-string field.
///
/// Returns `None` for empty or non-numeric input. Surrounding whitespace
/// is tolerated.
#[must_use]
pub fn parse_field(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Whether a decimal-string field is empty, unparseable, or exactly zero.
///
/// This is the "zero-value placeholder" check used by required-field
/// validation: a price of `"0"`, `"0.00"`, or `""` all count as unset.
#[must_use]
pub fn is_zero_or_unset(value: &str) -> bool {
    parse_field(value).is_none_or(|d| d.is_zero())
}
