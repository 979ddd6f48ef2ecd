//! User repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{user_settings, users};

/// Input for creating a user account.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login email.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Unique referral code.
    pub referral_code: String,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new user (unverified, zero balance) together with a
    /// default settings row.
    ///
    /// Both inserts run in one transaction: a user row without its
    /// settings row must never exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let txn = self.db.begin().await?;

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            phone: Set(input.phone),
            referral_code: Set(input.referral_code),
            balance: Set(Decimal::ZERO),
            email_verified_at: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        user_settings::ActiveModel {
            user_id: Set(user.id),
            email_notifications: Set(true),
            push_notifications: Set(true),
            marketing_emails: Set(false),
            login_alerts: Set(true),
            session_timeout: Set(30),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(user)
    }

    /// Marks a user's email as verified.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_email_verified(&self, id: Uuid) -> Result<(), DbErr> {
        let now = chrono::Utc::now().into();

        users::ActiveModel {
            id: Set(id),
            email_verified_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }

    /// Updates a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DbErr> {
        let now = chrono::Utc::now().into();

        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }

    /// Updates a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_profile(
        &self,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();

        users::ActiveModel {
            id: Set(id),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            phone: Set(phone.map(String::from)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }

    /// Deactivates a user account. The account is no longer able to log in
    /// or move funds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), DbErr> {
        let now = chrono::Utc::now().into();

        users::ActiveModel {
            id: Set(id),
            is_active: Set(false),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if a referral code is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn referral_code_exists(&self, code: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::ReferralCode.eq(code))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
