//! Support ticket routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, middleware::auth::AuthUser, response};
use aurum_db::entities::sea_orm_active_enums::TicketPriority;
use aurum_db::repositories::{SupportError, SupportRepository, TicketWithMessages};

/// Creates the support router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/support", get(list_tickets).post(create_ticket))
        .route("/support/{id}", get(get_ticket))
        .route("/support/{id}", patch(update_ticket))
        .route("/support/{id}/reply", post(reply))
}

/// New ticket payload.
#[derive(Debug, Deserialize, Validate)]
struct CreateTicketRequest {
    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    subject: String,
    #[validate(length(min = 1, max = 50, message = "Category is required"))]
    category: String,
    #[serde(default)]
    priority: Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    message: String,
}

/// Ticket status update payload. Only closing is supported from the user
/// side.
#[derive(Debug, Deserialize)]
struct UpdateTicketRequest {
    status: String,
}

/// Reply payload.
#[derive(Debug, Deserialize, Validate)]
struct ReplyRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    message: String,
}

fn parse_priority(raw: Option<&str>) -> Option<TicketPriority> {
    match raw {
        None => Some(TicketPriority::Medium),
        Some("low") => Some(TicketPriority::Low),
        Some("medium") => Some(TicketPriority::Medium),
        Some("high") => Some(TicketPriority::High),
        Some(_) => None,
    }
}

fn ticket_json(row: &TicketWithMessages) -> serde_json::Value {
    json!({
        "ticket": row.ticket,
        "messages": row.messages,
    })
}

fn support_error_response(err: &SupportError) -> Response {
    match err {
        SupportError::TicketNotFound(_) => {
            response::failure(StatusCode::NOT_FOUND, "Ticket not found")
        }
        SupportError::TicketClosed => response::failure(StatusCode::BAD_REQUEST, "Ticket is closed"),
        SupportError::Database(e) => {
            error!(error = %e, "Database error in support operation");
            response::db_failure()
        }
    }
}

/// GET /support - The caller's tickets, most recently updated first.
async fn list_tickets(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = SupportRepository::new((*state.db).clone());

    match repo.list_user_tickets(user.user_id()).await {
        Ok(tickets) => response::success(tickets),
        Err(e) => {
            error!(error = %e, "Database error listing tickets");
            response::db_failure()
        }
    }
}

/// POST /support - Open a ticket with its first message.
async fn create_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTicketRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    let Some(priority) = parse_priority(payload.priority.as_deref()) else {
        return response::validation_failure(json!({
            "priority": "Priority must be one of: low, medium, high"
        }));
    };

    let repo = SupportRepository::new((*state.db).clone());
    match repo
        .create_ticket(
            user.user_id(),
            &payload.subject,
            &payload.category,
            priority,
            &payload.message,
        )
        .await
    {
        Ok(row) => response::created(ticket_json(&row)),
        Err(e) => support_error_response(&e),
    }
}

/// GET /support/{id} - A ticket with its thread.
async fn get_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SupportRepository::new((*state.db).clone());

    match repo.get_ticket(user.user_id(), id).await {
        Ok(row) => response::success(ticket_json(&row)),
        Err(e) => support_error_response(&e),
    }
}

/// PATCH /support/{id} - Update ticket status (users may only close).
async fn update_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTicketRequest>,
) -> impl IntoResponse {
    if payload.status != "closed" {
        return response::validation_failure(json!({
            "status": "Only 'closed' is accepted"
        }));
    }

    let repo = SupportRepository::new((*state.db).clone());
    match repo.close_ticket(user.user_id(), id).await {
        Ok(()) => response::success_message("Ticket closed"),
        Err(e) => support_error_response(&e),
    }
}

/// POST /support/{id}/reply - Append a message to an open ticket.
async fn reply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplyRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    let repo = SupportRepository::new((*state.db).clone());
    match repo.add_message(user.user_id(), id, &payload.message).await {
        Ok(message) => response::created(message),
        Err(e) => support_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parsing() {
        assert_eq!(parse_priority(None), Some(TicketPriority::Medium));
        assert_eq!(parse_priority(Some("high")), Some(TicketPriority::High));
        assert_eq!(parse_priority(Some("urgent")), None);
    }
}
