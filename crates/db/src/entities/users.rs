//! `SeaORM` Entity for users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account holder. `balance` is mutated only by ledger operations.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique login email.
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id password hash (PHC string).
    pub password_hash: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Unique referral code (8 hex chars).
    #[sea_orm(unique)]
    pub referral_code: String,
    /// Current account balance; non-negative by database constraint.
    pub balance: Decimal,
    /// Set when the email was verified via OTP.
    pub email_verified_at: Option<DateTimeWithTimeZone>,
    /// Soft-deactivation flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Ledger transactions for this user.
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    /// Sessions opened by this user.
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
    /// Fund operations for this user.
    #[sea_orm(has_many = "super::fund_operations::Entity")]
    FundOperations,
    /// Investment positions held by this user.
    #[sea_orm(has_many = "super::user_investments::Entity")]
    UserInvestments,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::fund_operations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundOperations.def()
    }
}

impl Related<super::user_investments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserInvestments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
