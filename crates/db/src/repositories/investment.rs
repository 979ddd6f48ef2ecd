//! Investment repository: options catalog and user positions.
//!
//! Opening a position is a ledger operation and lives in the ledger
//! repository; this one covers catalog reads, admin CRUD on options, and
//! position listings.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{investment_options, user_investments};

/// Input for creating an investment option.
#[derive(Debug, Clone)]
pub struct CreateOptionInput {
    /// Display title.
    pub title: String,
    /// Image path or URL.
    pub image: String,
    /// Minimum amount accepted.
    pub min_investment: Decimal,
    /// Long description.
    pub description: String,
    /// Optional external link.
    pub link: Option<String>,
    /// Catalog ordering.
    pub sort_order: i32,
}

/// Input for updating an investment option. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptionInput {
    /// Display title.
    pub title: Option<String>,
    /// Image path or URL.
    pub image: Option<String>,
    /// Minimum amount accepted.
    pub min_investment: Option<Decimal>,
    /// Long description.
    pub description: Option<String>,
    /// Optional external link; `Some(None)` clears it.
    pub link: Option<Option<String>>,
    /// Catalog ordering.
    pub sort_order: Option<i32>,
    /// Visibility flag.
    pub is_active: Option<bool>,
}

/// A position together with its option's display fields.
#[derive(Debug, Clone)]
pub struct PositionWithOption {
    /// The position.
    pub position: user_investments::Model,
    /// The option it was opened against, if still present.
    pub option: Option<investment_options::Model>,
}

/// Investment repository for options and positions.
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    db: DatabaseConnection,
}

impl InvestmentRepository {
    /// Creates a new investment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active options in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active_options(&self) -> Result<Vec<investment_options::Model>, DbErr> {
        investment_options::Entity::find()
            .filter(investment_options::Column::IsActive.eq(true))
            .order_by_asc(investment_options::Column::SortOrder)
            .all(&self.db)
            .await
    }

    /// Lists all options, active or not, for the admin panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all_options(&self) -> Result<Vec<investment_options::Model>, DbErr> {
        investment_options::Entity::find()
            .order_by_asc(investment_options::Column::SortOrder)
            .all(&self.db)
            .await
    }

    /// Finds an option by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_option(
        &self,
        id: Uuid,
    ) -> Result<Option<investment_options::Model>, DbErr> {
        investment_options::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates an option.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_option(
        &self,
        input: CreateOptionInput,
    ) -> Result<investment_options::Model, DbErr> {
        let now = chrono::Utc::now().into();

        investment_options::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            image: Set(input.image),
            min_investment: Set(input.min_investment),
            description: Set(input.description),
            link: Set(input.link),
            sort_order: Set(input.sort_order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Updates an option. Returns `None` if the option does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update_option(
        &self,
        id: Uuid,
        input: UpdateOptionInput,
    ) -> Result<Option<investment_options::Model>, DbErr> {
        let Some(existing) = self.find_option(id).await? else {
            return Ok(None);
        };

        let mut model: investment_options::ActiveModel = existing.into();
        if let Some(title) = input.title {
            model.title = Set(title);
        }
        if let Some(image) = input.image {
            model.image = Set(image);
        }
        if let Some(min_investment) = input.min_investment {
            model.min_investment = Set(min_investment);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        if let Some(link) = input.link {
            model.link = Set(link);
        }
        if let Some(sort_order) = input.sort_order {
            model.sort_order = Set(sort_order);
        }
        if let Some(is_active) = input.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(Some(model.update(&self.db).await?))
    }

    /// Soft-deactivates an option so existing positions keep their
    /// reference. Returns whether the option existed.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn deactivate_option(&self, id: Uuid) -> Result<bool, DbErr> {
        let Some(existing) = self.find_option(id).await? else {
            return Ok(false);
        };

        let mut model: investment_options::ActiveModel = existing.into();
        model.is_active = Set(false);
        model.updated_at = Set(chrono::Utc::now().into());
        model.update(&self.db).await?;

        Ok(true)
    }

    /// Lists a user's positions, newest first, with option details.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_user_positions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PositionWithOption>, DbErr> {
        let rows = user_investments::Entity::find()
            .filter(user_investments::Column::UserId.eq(user_id))
            .find_also_related(investment_options::Entity)
            .order_by_desc(user_investments::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(position, option)| PositionWithOption { position, option })
            .collect())
    }
}
