//! Transaction repository for ledger history reads.
//!
//! Writes go through the ledger repository only; this one is read-only.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::TransactionKind, transactions};

/// Default page size for history queries.
const DEFAULT_LIMIT: u64 = 50;

/// Hard cap on page size.
const MAX_LIMIT: u64 = 100;

/// Transaction repository for ledger history.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's ledger entries, newest first.
    ///
    /// `limit` defaults to 50 and is clamped to 100.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        kind: Option<TransactionKind>,
        limit: Option<u64>,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::CreatedAt);

        if let Some(kind) = kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }

        query.limit(limit).all(&self.db).await
    }

    /// Gets a single entry, scoped to its owner.
    ///
    /// Another user's entry ID returns `None` rather than an error so the
    /// caller cannot distinguish "not yours" from "does not exist".
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }
}
