//! Monetary formatting helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders a monetary amount as `$X.YZ` with exactly two fractional digits.
///
/// Midpoints round away from zero, so `$1.975` renders as `$1.98`.
pub fn format_usd(amount: Decimal) -> String {
	let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
	format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;

	#[test]
	fn rounds_to_two_digits() {
		assert_eq!(format_usd(Decimal::from_str("1.9782").unwrap()), "$1.98");
		assert_eq!(format_usd(Decimal::from_str("12.9682").unwrap()), "$12.97");
		assert_eq!(format_usd(Decimal::from_str("3.5164").unwrap()), "$3.52");
	}

	#[test]
	fn pads_short_fractions() {
		assert_eq!(format_usd(Decimal::from_str("3.5").unwrap()), "$3.50");
		assert_eq!(format_usd(Decimal::from_str("10").unwrap()), "$10.00");
	}

	#[test]
	fn midpoint_rounds_away_from_zero() {
		assert_eq!(format_usd(Decimal::from_str("1.975").unwrap()), "$1.98");
	}
}
