//! Transaction history routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::auth::AuthUser, response};
use aurum_db::entities::sea_orm_active_enums::TransactionKind;
use aurum_db::repositories::TransactionRepository;

/// Creates the transactions router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list))
        .route("/transactions/{id}", get(get_one))
}

/// Query parameters for the history listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    limit: Option<u64>,
}

fn parse_kind(raw: &str) -> Option<TransactionKind> {
    match raw {
        "deposit" => Some(TransactionKind::Deposit),
        "withdrawal" => Some(TransactionKind::Withdrawal),
        "investment" => Some(TransactionKind::Investment),
        "transfer" => Some(TransactionKind::Transfer),
        "referral" => Some(TransactionKind::Referral),
        _ => None,
    }
}

/// GET /transactions?kind=&limit= - Ledger entries, newest first.
async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let kind = match query.kind.as_deref() {
        None => None,
        Some(raw) => match parse_kind(raw) {
            Some(k) => Some(k),
            None => {
                return response::validation_failure(serde_json::json!({
                    "kind": "Kind must be one of: deposit, withdrawal, investment, transfer, referral"
                }));
            }
        },
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list_for_user(user.user_id(), kind, query.limit).await {
        Ok(entries) => response::success(entries),
        Err(e) => {
            error!(error = %e, "Database error listing transactions");
            response::db_failure()
        }
    }
}

/// GET /transactions/{id} - A single entry, scoped to the caller.
async fn get_one(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.get_for_user(user.user_id(), id).await {
        Ok(Some(entry)) => response::success(entry),
        Ok(None) => response::failure(StatusCode::NOT_FOUND, "Transaction not found"),
        Err(e) => {
            error!(error = %e, "Database error loading transaction");
            response::db_failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing() {
        assert_eq!(parse_kind("deposit"), Some(TransactionKind::Deposit));
        assert_eq!(parse_kind("referral"), Some(TransactionKind::Referral));
        assert_eq!(parse_kind("unknown"), None);
    }
}
