//! Support repository: tickets and their message threads.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    sea_orm_active_enums::{SenderType, TicketPriority, TicketStatus},
    support_tickets, ticket_messages,
};

/// Error types for support operations.
#[derive(Debug, thiserror::Error)]
pub enum SupportError {
    /// Ticket not found (or not owned by the caller).
    #[error("Ticket not found: {0}")]
    TicketNotFound(Uuid),

    /// Ticket is closed and cannot take new messages.
    #[error("Ticket is closed")]
    TicketClosed,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A ticket together with its messages in chronological order.
#[derive(Debug, Clone)]
pub struct TicketWithMessages {
    /// The ticket.
    pub ticket: support_tickets::Model,
    /// Messages, oldest first.
    pub messages: Vec<ticket_messages::Model>,
}

/// Support repository for tickets and messages.
#[derive(Debug, Clone)]
pub struct SupportRepository {
    db: DatabaseConnection,
}

impl SupportRepository {
    /// Creates a new support repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a ticket with its initial message, atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn create_ticket(
        &self,
        user_id: Uuid,
        subject: &str,
        category: &str,
        priority: TicketPriority,
        body: &str,
    ) -> Result<TicketWithMessages, SupportError> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let ticket = support_tickets::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            subject: Set(subject.to_string()),
            category: Set(category.to_string()),
            priority: Set(priority),
            status: Set(TicketStatus::Open),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let message = ticket_messages::ActiveModel {
            id: Set(Uuid::new_v4()),
            ticket_id: Set(ticket.id),
            sender_id: Set(user_id),
            sender_type: Set(SenderType::User),
            body: Set(body.to_string()),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(TicketWithMessages {
            ticket,
            messages: vec![message],
        })
    }

    /// Lists a user's tickets, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_user_tickets(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<support_tickets::Model>, DbErr> {
        support_tickets::Entity::find()
            .filter(support_tickets::Column::UserId.eq(user_id))
            .order_by_desc(support_tickets::Column::UpdatedAt)
            .all(&self.db)
            .await
    }

    /// Gets a ticket with its thread, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::TicketNotFound`] when the ticket does not
    /// exist or belongs to another user, or [`SupportError::Database`].
    pub async fn get_ticket(
        &self,
        user_id: Uuid,
        ticket_id: Uuid,
    ) -> Result<TicketWithMessages, SupportError> {
        let ticket = support_tickets::Entity::find_by_id(ticket_id)
            .filter(support_tickets::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(SupportError::TicketNotFound(ticket_id))?;

        let messages = ticket_messages::Entity::find()
            .filter(ticket_messages::Column::TicketId.eq(ticket_id))
            .order_by_asc(ticket_messages::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(TicketWithMessages { ticket, messages })
    }

    /// Appends a user message to an open ticket and bumps its `updated_at`.
    ///
    /// A user reply moves a `pending` ticket back to `open`.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::TicketNotFound`], [`SupportError::TicketClosed`],
    /// or [`SupportError::Database`].
    pub async fn add_message(
        &self,
        user_id: Uuid,
        ticket_id: Uuid,
        body: &str,
    ) -> Result<ticket_messages::Model, SupportError> {
        let ticket = support_tickets::Entity::find_by_id(ticket_id)
            .filter(support_tickets::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(SupportError::TicketNotFound(ticket_id))?;

        if ticket.status == TicketStatus::Closed {
            return Err(SupportError::TicketClosed);
        }

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let message = ticket_messages::ActiveModel {
            id: Set(Uuid::new_v4()),
            ticket_id: Set(ticket_id),
            sender_id: Set(user_id),
            sender_type: Set(SenderType::User),
            body: Set(body.to_string()),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        support_tickets::ActiveModel {
            id: Set(ticket_id),
            status: Set(TicketStatus::Open),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        Ok(message)
    }

    /// Closes a ticket, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::TicketNotFound`] or [`SupportError::Database`].
    pub async fn close_ticket(&self, user_id: Uuid, ticket_id: Uuid) -> Result<(), SupportError> {
        let ticket = support_tickets::Entity::find_by_id(ticket_id)
            .filter(support_tickets::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(SupportError::TicketNotFound(ticket_id))?;

        support_tickets::ActiveModel {
            id: Set(ticket.id),
            status: Set(TicketStatus::Closed),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }
}
