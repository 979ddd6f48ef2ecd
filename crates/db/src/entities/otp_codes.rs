//! `SeaORM` Entity for otp_codes table.
//!
//! Codes are short-lived (10 minutes) and keyed by email because they are
//! issued before the user has a verified identity. Only the SHA-256 digest
//! of a code is stored; the plaintext exists in the verification email
//! alone.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "otp_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub code_hash: String,
    pub expires_at: DateTimeWithTimeZone,
    pub attempts: i32,
    pub consumed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
