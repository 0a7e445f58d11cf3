//! Amount display.

use num_format::{Locale, ToFormattedString};
use rust_decimal::{Decimal, RoundingStrategy};

/// Two decimal places with en thousands separators, e.g. `1,234.50`.
///
/// Rounds half away from zero to whole cents first so a fractional part
/// never carries into the integer part after formatting.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let cents = rounded.mantissa();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!(
        "{sign}{}.{:02}",
        (abs / 100).to_formatted_string(&Locale::en),
        abs % 100
    )
}
