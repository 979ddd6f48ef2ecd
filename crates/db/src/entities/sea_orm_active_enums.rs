//! `SeaORM` active enums mapping Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Classification of a ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Funds added to the account.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Funds taken out of the account.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
    /// Funds moved into an investment position.
    #[sea_orm(string_value = "investment")]
    Investment,
    /// Funds sent to another account.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Referral bonus credit.
    #[sea_orm(string_value = "referral")]
    Referral,
}

/// Settlement status of an operation.
///
/// Settlement is synchronous today, so rows are written as `Completed`;
/// the other variants exist for schema compatibility.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "operation_status")]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// Awaiting settlement.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Settlement failed.
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// Direction of a fund operation.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "fund_direction")]
#[serde(rename_all = "snake_case")]
pub enum FundDirection {
    /// Money coming in.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Money going out.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
}

/// Payment method of a fund operation.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "fund_method")]
#[serde(rename_all = "snake_case")]
pub enum FundMethod {
    /// Bank transfer.
    #[sea_orm(string_value = "bank")]
    Bank,
    /// Cryptocurrency.
    #[sea_orm(string_value = "crypto")]
    Crypto,
    /// Card payment.
    #[sea_orm(string_value = "card")]
    Card,
}

/// Lifecycle of an investment position.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "investment_status")]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    /// Position is live.
    #[sea_orm(string_value = "active")]
    Active,
    /// Position has been paid out.
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Support ticket status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Awaiting first response.
    #[sea_orm(string_value = "open")]
    Open,
    /// Waiting on the user.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Resolved.
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// Support ticket priority.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_priority")]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    /// Low priority.
    #[sea_orm(string_value = "low")]
    Low,
    /// Medium priority.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// High priority.
    #[sea_orm(string_value = "high")]
    High,
}

/// Who authored a ticket message.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sender_type")]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    /// The ticket owner.
    #[sea_orm(string_value = "user")]
    User,
    /// A support agent.
    #[sea_orm(string_value = "support")]
    Support,
}
