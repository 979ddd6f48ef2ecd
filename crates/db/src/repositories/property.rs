//! Property repository: public listings for the marketing site.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entities::properties;

/// Property repository for listing reads.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active properties, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<properties::Model>, DbErr> {
        properties::Entity::find()
            .filter(properties::Column::IsActive.eq(true))
            .order_by_desc(properties::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists featured properties for the landing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_featured(&self, limit: u64) -> Result<Vec<properties::Model>, DbErr> {
        properties::Entity::find()
            .filter(properties::Column::IsActive.eq(true))
            .filter(properties::Column::IsFeatured.eq(true))
            .order_by_desc(properties::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// Finds an active property by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(&self, id: Uuid) -> Result<Option<properties::Model>, DbErr> {
        properties::Entity::find_by_id(id)
            .filter(properties::Column::IsActive.eq(true))
            .one(&self.db)
            .await
    }
}
