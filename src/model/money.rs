//! Monetary helpers. The store runs in a single currency (BRL).

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders an amount the way customers read it, e.g. `R$ 1234,50`.
pub fn format_brl(amount: Decimal) -> String {
    format!("R$ {:.2}", round_money(amount)).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
        assert_eq!(round_money(dec!(-2.345)), dec!(-2.35));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(dec!(95)), "R$ 95,00");
        assert_eq!(format_brl(dec!(1234.5)), "R$ 1234,50");
    }
}
