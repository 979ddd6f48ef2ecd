//! Content repository: team members and testimonials.
//!
//! Public reads return active rows only; the admin panel sees everything.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{team_members, testimonials};

/// Input for creating a team member.
#[derive(Debug, Clone)]
pub struct CreateTeamMemberInput {
    /// Full name.
    pub name: String,
    /// Role title.
    pub role: String,
    /// Image path or URL.
    pub image: String,
    /// Optional Instagram URL.
    pub instagram: Option<String>,
    /// Display ordering.
    pub sort_order: i32,
}

/// Input for updating a team member. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamMemberInput {
    /// Full name.
    pub name: Option<String>,
    /// Role title.
    pub role: Option<String>,
    /// Image path or URL.
    pub image: Option<String>,
    /// Optional Instagram URL; `Some(None)` clears it.
    pub instagram: Option<Option<String>>,
    /// Display ordering.
    pub sort_order: Option<i32>,
    /// Visibility flag.
    pub is_active: Option<bool>,
}

/// Input for creating a testimonial.
#[derive(Debug, Clone)]
pub struct CreateTestimonialInput {
    /// Author name.
    pub name: String,
    /// Author designation.
    pub designation: String,
    /// Quote body.
    pub content: String,
    /// Image path or URL.
    pub image: String,
    /// Star rating, 1 to 5.
    pub star: i32,
}

/// Input for updating a testimonial. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct UpdateTestimonialInput {
    /// Author name.
    pub name: Option<String>,
    /// Author designation.
    pub designation: Option<String>,
    /// Quote body.
    pub content: Option<String>,
    /// Image path or URL.
    pub image: Option<String>,
    /// Star rating, 1 to 5.
    pub star: Option<i32>,
    /// Visibility flag.
    pub is_active: Option<bool>,
}

/// Content repository for marketing-site content.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    db: DatabaseConnection,
}

impl ContentRepository {
    /// Creates a new content repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Team members
    // ------------------------------------------------------------------

    /// Lists active team members in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active_team_members(&self) -> Result<Vec<team_members::Model>, DbErr> {
        team_members::Entity::find()
            .filter(team_members::Column::IsActive.eq(true))
            .order_by_asc(team_members::Column::SortOrder)
            .all(&self.db)
            .await
    }

    /// Lists all team members for the admin panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all_team_members(&self) -> Result<Vec<team_members::Model>, DbErr> {
        team_members::Entity::find()
            .order_by_asc(team_members::Column::SortOrder)
            .all(&self.db)
            .await
    }

    /// Creates a team member.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_team_member(
        &self,
        input: CreateTeamMemberInput,
    ) -> Result<team_members::Model, DbErr> {
        let now = chrono::Utc::now().into();

        team_members::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            role: Set(input.role),
            image: Set(input.image),
            instagram: Set(input.instagram),
            sort_order: Set(input.sort_order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Updates a team member. Returns `None` if no such row.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update_team_member(
        &self,
        id: Uuid,
        input: UpdateTeamMemberInput,
    ) -> Result<Option<team_members::Model>, DbErr> {
        let Some(existing) = team_members::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: team_members::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(role) = input.role {
            model.role = Set(role);
        }
        if let Some(image) = input.image {
            model.image = Set(image);
        }
        if let Some(instagram) = input.instagram {
            model.instagram = Set(instagram);
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

    /// Soft-deactivates a team member. Returns whether the row existed.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn deactivate_team_member(&self, id: Uuid) -> Result<bool, DbErr> {
        let Some(existing) = team_members::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };

        let mut model: team_members::ActiveModel = existing.into();
        model.is_active = Set(false);
        model.updated_at = Set(chrono::Utc::now().into());
        model.update(&self.db).await?;

        Ok(true)
    }

    // ------------------------------------------------------------------
    // Testimonials
    // ------------------------------------------------------------------

    /// Lists active testimonials, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active_testimonials(&self) -> Result<Vec<testimonials::Model>, DbErr> {
        testimonials::Entity::find()
            .filter(testimonials::Column::IsActive.eq(true))
            .order_by_desc(testimonials::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists all testimonials for the admin panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all_testimonials(&self) -> Result<Vec<testimonials::Model>, DbErr> {
        testimonials::Entity::find()
            .order_by_desc(testimonials::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates a testimonial.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_testimonial(
        &self,
        input: CreateTestimonialInput,
    ) -> Result<testimonials::Model, DbErr> {
        let now = chrono::Utc::now().into();

        testimonials::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            designation: Set(input.designation),
            content: Set(input.content),
            image: Set(input.image),
            star: Set(input.star),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Updates a testimonial. Returns `None` if no such row.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update_testimonial(
        &self,
        id: Uuid,
        input: UpdateTestimonialInput,
    ) -> Result<Option<testimonials::Model>, DbErr> {
        let Some(existing) = testimonials::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: testimonials::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(designation) = input.designation {
            model.designation = Set(designation);
        }
        if let Some(content) = input.content {
            model.content = Set(content);
        }
        if let Some(image) = input.image {
            model.image = Set(image);
        }
        if let Some(star) = input.star {
            model.star = Set(star);
        }
        if let Some(is_active) = input.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(Some(model.update(&self.db).await?))
    }

    /// Soft-deactivates a testimonial. Returns whether the row existed.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn deactivate_testimonial(&self, id: Uuid) -> Result<bool, DbErr> {
        let Some(existing) = testimonials::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };

        let mut model: testimonials::ActiveModel = existing.into();
        model.is_active = Set(false);
        model.updated_at = Set(chrono::Utc::now().into());
        model.update(&self.db).await?;

        Ok(true)
    }
}
