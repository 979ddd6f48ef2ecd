//! Investment routes: the public options catalog and user positions.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::routes::fund::map_ledger_error;
use crate::{AppState, middleware::auth::AuthUser, response};
use aurum_db::repositories::{InvestmentRepository, LedgerRepository, PositionWithOption};

/// Routes that need no authentication.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/investments/options", get(list_options))
}

/// Routes behind the bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/investments", get(list_positions))
        .route("/investments", post(invest))
}

/// Investment payload.
#[derive(Debug, Deserialize)]
struct InvestRequest {
    option_id: Uuid,
    amount: Decimal,
}

fn position_json(row: &PositionWithOption) -> serde_json::Value {
    json!({
        "position": row.position,
        "option": row.option.as_ref().map(|o| json!({
            "id": o.id,
            "title": o.title,
            "image": o.image,
            "min_investment": o.min_investment,
        })),
    })
}

/// GET /investments/options - Active options in catalog order.
async fn list_options(State(state): State<AppState>) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo.list_active_options().await {
        Ok(options) => response::success(options),
        Err(e) => {
            error!(error = %e, "Database error listing investment options");
            response::db_failure()
        }
    }
}

/// GET /investments - The caller's positions with option details.
async fn list_positions(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo.list_user_positions(user.user_id()).await {
        Ok(rows) => {
            let data: Vec<_> = rows.iter().map(position_json).collect();
            response::success(data)
        }
        Err(e) => {
            error!(error = %e, "Database error listing positions");
            response::db_failure()
        }
    }
}

/// POST /investments - Open a position, debiting the balance.
async fn invest(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<InvestRequest>,
) -> impl IntoResponse {
    let ledger = LedgerRepository::new((*state.db).clone());

    match ledger
        .invest(user.user_id(), payload.option_id, payload.amount)
        .await
    {
        Ok(outcome) => response::created(json!({
            "position": outcome.position,
            "balance": outcome.balance,
        })),
        Err(e) => map_ledger_error(&e),
    }
}
