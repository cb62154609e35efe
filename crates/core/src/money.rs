//! Money
//!
//! Line subtotal arithmetic for cart previews. Existing orders carry
//! server-computed totals; these rules only have to agree with the server
//! for the preview to reconcile.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency display precision in decimal places.
pub const CURRENCY_SCALE: u32 = 2;

/// Round an amount to currency precision, half-up.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculate a line subtotal: `unit_price × quantity`, rounded to currency
/// precision.
#[must_use]
pub fn line_subtotal(unit_price: Decimal, quantity: Decimal) -> Decimal {
    round_currency(unit_price * quantity)
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn subtotal_multiplies_and_rounds() {
        assert_eq!(line_subtotal(dec!(10.00), dec!(2)), dec!(20.00));
        assert_eq!(line_subtotal(dec!(0.335), dec!(1)), dec!(0.34));
    }

    #[test]
    fn half_up_rounds_away_from_zero() {
        assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
        assert_eq!(round_currency(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn fractional_quantities_are_exact() {
        // 0.1 kg at 33.30 per kg
        assert_eq!(line_subtotal(dec!(33.30), dec!(0.1)), dec!(3.33));
    }
}
