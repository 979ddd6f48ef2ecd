//! Ledger repository: the single place where account balances change.
//!
//! Every balance mutation runs inside a database transaction and pairs the
//! balance update with an immutable `transactions` row. Debits never
//! read-check-write: they issue one conditional decrement
//! (`... SET balance = balance - $amt WHERE id = $id AND is_active AND
//! balance >= $amt`) and inspect `rows_affected`, so two racing debits can
//! never both pass a stale funds check.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use aurum_core::ledger::{OperationKind, check_minimum, validate_amount};

use crate::entities::{
    fund_operations,
    sea_orm_active_enums::{
        FundDirection, FundMethod, InvestmentStatus, OperationStatus, TransactionKind,
    },
    transactions, transfers, user_investments, users,
};

/// Window within which a repeated idempotency key replays the stored
/// operation instead of creating a new one.
const IDEMPOTENCY_WINDOW_HOURS: i64 = 24;

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account is deactivated.
    #[error("Account is deactivated")]
    AccountInactive,

    /// Amount must be positive.
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Not enough funds. The message deliberately carries no balance detail.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Investment option not found.
    #[error("Investment option not found: {0}")]
    OptionNotFound(Uuid),

    /// Investment option exists but is not open for investment.
    #[error("Investment option is not available")]
    OptionUnavailable,

    /// Amount is below the option's minimum.
    #[error("Amount is below the minimum investment of {minimum}")]
    BelowMinimum {
        /// The option's minimum investment.
        minimum: Decimal,
    },

    /// Transfer recipient not found or inactive.
    #[error("Recipient not found")]
    RecipientNotFound,

    /// Sender and recipient are the same account.
    #[error("Cannot transfer to your own account")]
    SelfTransfer,

    /// An idempotency key was reused for a different direction or amount.
    #[error("Idempotency key already used for a different operation")]
    IdempotencyConflict,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for a deposit or withdrawal.
#[derive(Debug, Clone)]
pub struct FundOperationInput {
    /// Account to operate on.
    pub user_id: Uuid,
    /// Payment method.
    pub method: FundMethod,
    /// Positive amount.
    pub amount: Decimal,
    /// Method-specific metadata (bank name, wallet address, card last4).
    pub details: serde_json::Value,
    /// Optional client-supplied key for safe retries.
    pub idempotency_key: Option<String>,
}

/// Result of a deposit or withdrawal.
#[derive(Debug, Clone)]
pub struct FundOutcome {
    /// The fund operation record.
    pub operation: fund_operations::Model,
    /// The account balance after the operation.
    pub balance: Decimal,
    /// True when an idempotency key matched a prior operation and no new
    /// writes were made.
    pub replayed: bool,
}

/// Result of opening an investment position.
#[derive(Debug, Clone)]
pub struct InvestmentOutcome {
    /// The created position.
    pub position: user_investments::Model,
    /// The account balance after the debit.
    pub balance: Decimal,
}

/// Result of a transfer between accounts.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// The transfer record.
    pub transfer: transfers::Model,
    /// The sender's balance after the debit.
    pub balance: Decimal,
}

/// Ledger repository for atomic balance operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Deposits funds into an account.
    ///
    /// Inside one transaction: increments the balance, inserts a
    /// `fund_operations` row and a `transactions` row. A repeated
    /// idempotency key within the last 24 hours replays the stored
    /// operation without new writes.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`], [`LedgerError::AccountNotFound`],
    /// [`LedgerError::AccountInactive`], or [`LedgerError::Database`].
    pub async fn deposit(&self, input: FundOperationInput) -> Result<FundOutcome, LedgerError> {
        validate_amount(input.amount).map_err(|_| LedgerError::InvalidAmount)?;

        if let Some(outcome) = self.find_replay(&input, FundDirection::Deposit).await? {
            return Ok(outcome);
        }

        let txn = self.db.begin().await?;

        let balance = Self::credit_balance(&txn, input.user_id, input.amount).await?;
        let operation =
            Self::insert_fund_operation(&txn, &input, FundDirection::Deposit).await?;
        Self::insert_entry(
            &txn,
            input.user_id,
            OperationKind::Deposit,
            input.amount,
            format!("Deposit via {}", method_label(&input.method)),
            Some(operation.id),
        )
        .await?;

        txn.commit().await?;

        Ok(FundOutcome {
            operation,
            balance,
            replayed: false,
        })
    }

    /// Withdraws funds from an account.
    ///
    /// The debit path: conditional decrement first, then the
    /// `fund_operations` and `transactions` rows. On zero affected rows the
    /// account is loaded once to distinguish a missing or inactive account
    /// from insufficient funds.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`], [`LedgerError::AccountNotFound`],
    /// [`LedgerError::AccountInactive`], [`LedgerError::InsufficientBalance`],
    /// or [`LedgerError::Database`].
    pub async fn withdraw(&self, input: FundOperationInput) -> Result<FundOutcome, LedgerError> {
        validate_amount(input.amount).map_err(|_| LedgerError::InvalidAmount)?;

        if let Some(outcome) = self.find_replay(&input, FundDirection::Withdrawal).await? {
            return Ok(outcome);
        }

        let txn = self.db.begin().await?;

        let balance = Self::debit_balance(&txn, input.user_id, input.amount).await?;
        let operation =
            Self::insert_fund_operation(&txn, &input, FundDirection::Withdrawal).await?;
        Self::insert_entry(
            &txn,
            input.user_id,
            OperationKind::Withdrawal,
            input.amount,
            format!("Withdrawal via {}", method_label(&input.method)),
            Some(operation.id),
        )
        .await?;

        txn.commit().await?;

        Ok(FundOutcome {
            operation,
            balance,
            replayed: false,
        })
    }

    /// Opens an investment position, debiting the account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OptionNotFound`], [`LedgerError::OptionUnavailable`],
    /// [`LedgerError::BelowMinimum`], [`LedgerError::InsufficientBalance`],
    /// [`LedgerError::AccountNotFound`], [`LedgerError::AccountInactive`],
    /// [`LedgerError::InvalidAmount`], or [`LedgerError::Database`].
    pub async fn invest(
        &self,
        user_id: Uuid,
        option_id: Uuid,
        amount: Decimal,
    ) -> Result<InvestmentOutcome, LedgerError> {
        validate_amount(amount).map_err(|_| LedgerError::InvalidAmount)?;

        let option = crate::entities::investment_options::Entity::find_by_id(option_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::OptionNotFound(option_id))?;

        if !option.is_active {
            return Err(LedgerError::OptionUnavailable);
        }
        check_minimum(amount, option.min_investment).map_err(|_| LedgerError::BelowMinimum {
            minimum: option.min_investment,
        })?;

        let txn = self.db.begin().await?;

        let balance = Self::debit_balance(&txn, user_id, amount).await?;

        let now = Utc::now().into();
        let position = user_investments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            investment_option_id: Set(option_id),
            amount: Set(amount),
            status: Set(InvestmentStatus::Active),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        Self::insert_entry(
            &txn,
            user_id,
            OperationKind::Investment,
            amount,
            format!("Investment in {}", option.title),
            Some(option_id),
        )
        .await?;

        txn.commit().await?;

        Ok(InvestmentOutcome { position, balance })
    }

    /// Transfers funds to another account, resolved by email.
    ///
    /// Debits the sender with the conditional decrement, credits the
    /// recipient, and writes one `transfers` row plus a ledger entry on
    /// each side, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RecipientNotFound`], [`LedgerError::SelfTransfer`],
    /// [`LedgerError::InsufficientBalance`], [`LedgerError::AccountNotFound`],
    /// [`LedgerError::AccountInactive`], [`LedgerError::InvalidAmount`],
    /// or [`LedgerError::Database`].
    pub async fn transfer(
        &self,
        sender_id: Uuid,
        recipient_email: &str,
        amount: Decimal,
        note: Option<&str>,
    ) -> Result<TransferOutcome, LedgerError> {
        validate_amount(amount).map_err(|_| LedgerError::InvalidAmount)?;

        let sender = users::Entity::find_by_id(sender_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::AccountNotFound(sender_id))?;

        let recipient = users::Entity::find()
            .filter(users::Column::Email.eq(recipient_email))
            .filter(users::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(LedgerError::RecipientNotFound)?;

        if recipient.id == sender_id {
            return Err(LedgerError::SelfTransfer);
        }

        let txn = self.db.begin().await?;

        let balance = Self::debit_balance(&txn, sender_id, amount).await?;
        Self::credit_balance(&txn, recipient.id, amount).await?;

        let now = Utc::now().into();
        let transfer = transfers::ActiveModel {
            id: Set(Uuid::new_v4()),
            sender_id: Set(sender_id),
            recipient_id: Set(recipient.id),
            amount: Set(amount),
            note: Set(note.map(String::from)),
            status: Set(OperationStatus::Completed),
            created_at: Set(now),
            completed_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        Self::insert_entry(
            &txn,
            sender_id,
            OperationKind::Transfer,
            amount,
            format!("Transfer to {}", recipient.email),
            Some(transfer.id),
        )
        .await?;

        // Recipient side is a credit; insert the row directly with a
        // positive amount since OperationKind::Transfer signs negative.
        let entry = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(recipient.id),
            kind: Set(TransactionKind::Transfer),
            amount: Set(amount),
            status: Set(OperationStatus::Completed),
            description: Set(format!("Transfer from {}", sender.email)),
            reference: Set(Some(transfer.id)),
            created_at: Set(now),
        };
        entry.insert(&txn).await?;

        txn.commit().await?;

        Ok(TransferOutcome { transfer, balance })
    }

    /// Lists a user's fund operations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_fund_operations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<fund_operations::Model>, DbErr> {
        fund_operations::Entity::find()
            .filter(fund_operations::Column::UserId.eq(user_id))
            .order_by_desc(fund_operations::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists transfers a user sent or received, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transfers(&self, user_id: Uuid) -> Result<Vec<transfers::Model>, DbErr> {
        transfers::Entity::find()
            .filter(
                Condition::any()
                    .add(transfers::Column::SenderId.eq(user_id))
                    .add(transfers::Column::RecipientId.eq(user_id)),
            )
            .order_by_desc(transfers::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Applies the conditional decrement and returns the new balance.
    ///
    /// Zero affected rows means the funds check failed inside the database;
    /// the account is then loaded once to classify the failure.
    async fn debit_balance(
        txn: &DatabaseTransaction,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Balance,
                Expr::col(users::Column::Balance).sub(amount),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .filter(users::Column::IsActive.eq(true))
            .filter(users::Column::Balance.gte(amount))
            .exec(txn)
            .await?;

        if result.rows_affected == 0 {
            let user = users::Entity::find_by_id(user_id).one(txn).await?;
            return Err(match user {
                None => LedgerError::AccountNotFound(user_id),
                Some(u) if !u.is_active => LedgerError::AccountInactive,
                Some(_) => LedgerError::InsufficientBalance,
            });
        }

        Self::current_balance(txn, user_id).await
    }

    /// Applies the mirrored unconditional increment and returns the new balance.
    async fn credit_balance(
        txn: &DatabaseTransaction,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Balance,
                Expr::col(users::Column::Balance).add(amount),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .filter(users::Column::IsActive.eq(true))
            .exec(txn)
            .await?;

        if result.rows_affected == 0 {
            let user = users::Entity::find_by_id(user_id).one(txn).await?;
            return Err(match user {
                None => LedgerError::AccountNotFound(user_id),
                Some(_) => LedgerError::AccountInactive,
            });
        }

        Self::current_balance(txn, user_id).await
    }

    async fn current_balance(
        txn: &DatabaseTransaction,
        user_id: Uuid,
    ) -> Result<Decimal, LedgerError> {
        let user = users::Entity::find_by_id(user_id)
            .one(txn)
            .await?
            .ok_or(LedgerError::AccountNotFound(user_id))?;
        Ok(user.balance)
    }

    /// Inserts a ledger entry with the kind's sign applied.
    async fn insert_entry(
        txn: &DatabaseTransaction,
        user_id: Uuid,
        kind: OperationKind,
        amount: Decimal,
        description: String,
        reference: Option<Uuid>,
    ) -> Result<transactions::Model, LedgerError> {
        let entry = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(entry_kind(kind)),
            amount: Set(kind.signed_amount(amount)),
            status: Set(OperationStatus::Completed),
            description: Set(description),
            reference: Set(reference),
            created_at: Set(Utc::now().into()),
        };
        Ok(entry.insert(txn).await?)
    }

    async fn insert_fund_operation(
        txn: &DatabaseTransaction,
        input: &FundOperationInput,
        direction: FundDirection,
    ) -> Result<fund_operations::Model, LedgerError> {
        let now = Utc::now().into();
        let operation = fund_operations::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            direction: Set(direction),
            method: Set(input.method.clone()),
            amount: Set(input.amount),
            status: Set(OperationStatus::Completed),
            details: Set(input.details.clone()),
            idempotency_key: Set(input.idempotency_key.clone()),
            created_at: Set(now),
            completed_at: Set(Some(now)),
        };
        Ok(operation.insert(txn).await?)
    }

    /// Looks up a prior operation matching the idempotency key within the
    /// replay window. Returns the stored outcome without new writes.
    ///
    /// A key reused with a different direction or amount is a conflict,
    /// never a replay: answering a withdrawal with a stored deposit would
    /// report a debit that never happened.
    async fn find_replay(
        &self,
        input: &FundOperationInput,
        direction: FundDirection,
    ) -> Result<Option<FundOutcome>, LedgerError> {
        let Some(key) = &input.idempotency_key else {
            return Ok(None);
        };

        let cutoff = Utc::now() - Duration::hours(IDEMPOTENCY_WINDOW_HOURS);
        let existing = fund_operations::Entity::find()
            .filter(fund_operations::Column::UserId.eq(input.user_id))
            .filter(fund_operations::Column::IdempotencyKey.eq(key.as_str()))
            .filter(fund_operations::Column::CreatedAt.gt(cutoff))
            .one(&self.db)
            .await?;

        let Some(operation) = existing else {
            return Ok(None);
        };

        if operation.direction != direction || operation.amount != input.amount {
            return Err(LedgerError::IdempotencyConflict);
        }

        let user = users::Entity::find_by_id(input.user_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::AccountNotFound(input.user_id))?;

        Ok(Some(FundOutcome {
            operation,
            balance: user.balance,
            replayed: true,
        }))
    }
}

fn entry_kind(kind: OperationKind) -> TransactionKind {
    match kind {
        OperationKind::Deposit => TransactionKind::Deposit,
        OperationKind::Withdrawal => TransactionKind::Withdrawal,
        OperationKind::Investment => TransactionKind::Investment,
        OperationKind::Transfer => TransactionKind::Transfer,
        OperationKind::Referral => TransactionKind::Referral,
    }
}

fn method_label(method: &FundMethod) -> &'static str {
    match method {
        FundMethod::Bank => "bank",
        FundMethod::Crypto => "crypto",
        FundMethod::Card => "card",
    }
}
