//! Settings repository: per-user notification and security preferences.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::user_settings;

/// Input for updating settings. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsInput {
    /// Transactional email notifications.
    pub email_notifications: Option<bool>,
    /// Push notifications.
    pub push_notifications: Option<bool>,
    /// Marketing emails.
    pub marketing_emails: Option<bool>,
    /// Alert on new login.
    pub login_alerts: Option<bool>,
    /// Session timeout in minutes.
    pub session_timeout: Option<i32>,
}

/// Settings repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a user's settings, creating the default row if missing.
    ///
    /// Accounts registered before the settings table existed have no row;
    /// the defaults are materialized on first read.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<user_settings::Model, DbErr> {
        if let Some(settings) = user_settings::Entity::find_by_id(user_id).one(&self.db).await? {
            return Ok(settings);
        }

        let now = chrono::Utc::now().into();
        user_settings::ActiveModel {
            user_id: Set(user_id),
            email_notifications: Set(true),
            push_notifications: Set(true),
            marketing_emails: Set(false),
            login_alerts: Set(true),
            session_timeout: Set(30),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Applies a partial update to a user's settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update(
        &self,
        user_id: Uuid,
        input: UpdateSettingsInput,
    ) -> Result<user_settings::Model, DbErr> {
        let existing = self.get_or_create(user_id).await?;

        let mut model: user_settings::ActiveModel = existing.into();
        if let Some(v) = input.email_notifications {
            model.email_notifications = Set(v);
        }
        if let Some(v) = input.push_notifications {
            model.push_notifications = Set(v);
        }
        if let Some(v) = input.marketing_emails {
            model.marketing_emails = Set(v);
        }
        if let Some(v) = input.login_alerts {
            model.login_alerts = Set(v);
        }
        if let Some(v) = input.session_timeout {
            model.session_timeout = Set(v);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        model.update(&self.db).await
    }

    /// Deletes a user's settings row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, user_id: Uuid) -> Result<(), DbErr> {
        user_settings::Entity::delete_many()
            .filter(user_settings::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(())
    }
}
