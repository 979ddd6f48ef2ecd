//! Ledger rules: operation kinds, signed amounts, funds checks.
//!
//! Every balance-affecting event on the platform is classified by an
//! [`OperationKind`]; the rules here decide the sign it applies to the
//! account balance and whether the operation is allowed to proceed.
//! The atomic application of these rules happens in the database layer.

mod rules;

pub use rules::{LedgerRuleError, check_minimum, validate_amount};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of a balance-affecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Funds added to the account.
    Deposit,
    /// Funds taken out of the account.
    Withdrawal,
    /// Funds moved into an investment position.
    Investment,
    /// Funds sent to another account.
    Transfer,
    /// Referral bonus credit.
    Referral,
}

impl OperationKind {
    /// Returns true if this kind credits the account balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Deposit | Self::Referral)
    }

    /// Applies this kind's sign to a positive amount.
    ///
    /// Credits stay positive, debits become negative. The ledger stores
    /// signed amounts so that summing a user's entries yields the balance.
    #[must_use]
    pub fn signed_amount(self, amount: Decimal) -> Decimal {
        if self.is_credit() { amount } else { -amount }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Investment => "investment",
            Self::Transfer => "transfer",
            Self::Referral => "referral",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_amounts() {
        assert_eq!(OperationKind::Deposit.signed_amount(dec!(100)), dec!(100));
        assert_eq!(OperationKind::Referral.signed_amount(dec!(25)), dec!(25));
        assert_eq!(
            OperationKind::Withdrawal.signed_amount(dec!(100)),
            dec!(-100)
        );
        assert_eq!(
            OperationKind::Investment.signed_amount(dec!(500)),
            dec!(-500)
        );
        assert_eq!(OperationKind::Transfer.signed_amount(dec!(10)), dec!(-10));
    }

    #[test]
    fn test_display() {
        assert_eq!(OperationKind::Deposit.to_string(), "deposit");
        assert_eq!(OperationKind::Withdrawal.to_string(), "withdrawal");
        assert_eq!(OperationKind::Referral.to_string(), "referral");
    }
}
