//! Transfer routes: send funds to another account by email.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use validator::Validate;

use crate::routes::fund::map_ledger_error;
use crate::{AppState, middleware::auth::AuthUser, response};
use aurum_db::repositories::LedgerRepository;

/// Creates the transfer router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transfer", post(create))
        .route("/transfer", get(list))
}

/// Transfer payload.
#[derive(Debug, Deserialize, Validate)]
struct TransferRequest {
    /// Recipient account email.
    #[validate(email(message = "Must be a valid email address"))]
    recipient_email: String,
    /// Positive amount to send.
    amount: Decimal,
    /// Optional note shown to both parties.
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    #[serde(default)]
    note: Option<String>,
}

/// POST /transfer - Move funds to another account.
async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    let ledger = LedgerRepository::new((*state.db).clone());
    match ledger
        .transfer(
            user.user_id(),
            &payload.recipient_email,
            payload.amount,
            payload.note.as_deref(),
        )
        .await
    {
        Ok(outcome) => {
            info!(
                transfer_id = %outcome.transfer.id,
                sender_id = %user.user_id(),
                "Transfer completed"
            );
            response::created(json!({
                "transfer": outcome.transfer,
                "balance": outcome.balance,
            }))
        }
        Err(e) => map_ledger_error(&e),
    }
}

/// GET /transfer - Transfers the caller sent or received, newest first.
async fn list(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let ledger = LedgerRepository::new((*state.db).clone());

    match ledger.list_transfers(user.user_id()).await {
        Ok(transfers) => response::success(transfers),
        Err(e) => {
            error!(error = %e, "Database error listing transfers");
            response::db_failure()
        }
    }
}
