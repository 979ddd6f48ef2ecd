//! Admission rules for ledger operations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rule violations that reject a ledger operation before any write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerRuleError {
    /// Amount must be a positive value.
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Investment amount is below the option's minimum.
    #[error("Amount is below the minimum investment")]
    BelowMinimum,
}

/// Validates that an operation amount is strictly positive.
///
/// The operation itself determines the sign; callers always submit a
/// positive magnitude. The funds check has no counterpart here: it is
/// the conditional decrement the database layer issues atomically with
/// the writes.
///
/// # Errors
///
/// Returns `LedgerRuleError::InvalidAmount` for zero or negative amounts.
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerRuleError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerRuleError::InvalidAmount);
    }
    Ok(())
}

/// Checks an investment amount against the option's minimum.
///
/// # Errors
///
/// Returns `LedgerRuleError::BelowMinimum` if `amount < minimum`.
pub fn check_minimum(amount: Decimal, minimum: Decimal) -> Result<(), LedgerRuleError> {
    if amount < minimum {
        return Err(LedgerRuleError::BelowMinimum);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(dec!(0.01)).is_ok());
        assert_eq!(
            validate_amount(Decimal::ZERO),
            Err(LedgerRuleError::InvalidAmount)
        );
        assert_eq!(
            validate_amount(dec!(-5)),
            Err(LedgerRuleError::InvalidAmount)
        );
    }

    #[test]
    fn test_check_minimum() {
        assert!(check_minimum(dec!(15000), dec!(15000)).is_ok());
        assert_eq!(
            check_minimum(dec!(14999.99), dec!(15000)),
            Err(LedgerRuleError::BelowMinimum)
        );
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (-1_000_000_000i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// An admitted amount is strictly positive.
        #[test]
        fn prop_admitted_amounts_are_positive(amount in amount_strategy()) {
            if validate_amount(amount).is_ok() {
                prop_assert!(amount > Decimal::ZERO);
            }
        }

        /// An amount admitted against a minimum covers it.
        #[test]
        fn prop_admitted_investment_covers_minimum(
            amount in amount_strategy(),
            minimum in amount_strategy(),
        ) {
            if check_minimum(amount, minimum).is_ok() {
                prop_assert!(amount >= minimum);
            }
        }
    }
}
