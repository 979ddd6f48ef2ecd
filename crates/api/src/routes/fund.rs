//! Fund routes: deposits, withdrawals, and their history.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::auth::AuthUser, response};
use aurum_db::entities::sea_orm_active_enums::FundMethod;
use aurum_db::repositories::{FundOperationInput, FundOutcome, LedgerError, LedgerRepository};

/// Creates the fund router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fund/deposit", post(deposit))
        .route("/fund/withdraw", post(withdraw))
        .route("/fund/history", get(history))
}

/// Deposit or withdrawal payload.
#[derive(Debug, Deserialize)]
struct FundRequest {
    amount: Decimal,
    method: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
    #[serde(default)]
    idempotency_key: Option<String>,
}

fn parse_method(raw: &str) -> Option<FundMethod> {
    match raw {
        "bank" => Some(FundMethod::Bank),
        "crypto" => Some(FundMethod::Crypto),
        "card" => Some(FundMethod::Card),
        _ => None,
    }
}

fn build_input(user_id: uuid::Uuid, payload: FundRequest) -> Result<FundOperationInput, Response> {
    if payload.amount <= Decimal::ZERO {
        return Err(response::validation_failure(
            json!({ "amount": "Amount must be greater than zero" }),
        ));
    }

    let Some(method) = parse_method(&payload.method) else {
        return Err(response::validation_failure(
            json!({ "method": "Method must be one of: bank, crypto, card" }),
        ));
    };

    Ok(FundOperationInput {
        user_id,
        method,
        amount: payload.amount,
        details: payload.details.unwrap_or_else(|| json!({})),
        idempotency_key: payload.idempotency_key,
    })
}

fn fund_outcome_response(outcome: &FundOutcome) -> Response {
    let data = json!({
        "operation": outcome.operation,
        "balance": outcome.balance,
    });

    // A replayed idempotent request answers 200, a fresh operation 201.
    if outcome.replayed {
        response::success(data)
    } else {
        response::created(data)
    }
}

pub(crate) fn ledger_error_response(err: &LedgerError) -> Response {
    match err {
        LedgerError::InvalidAmount => {
            response::validation_failure(json!({ "amount": "Amount must be greater than zero" }))
        }
        LedgerError::InsufficientBalance => {
            response::failure(StatusCode::BAD_REQUEST, "Insufficient balance")
        }
        LedgerError::AccountNotFound(_) => {
            response::failure(StatusCode::NOT_FOUND, "Account not found")
        }
        LedgerError::AccountInactive => {
            response::failure(StatusCode::BAD_REQUEST, "Account is deactivated")
        }
        LedgerError::OptionNotFound(_) => {
            response::failure(StatusCode::NOT_FOUND, "Investment option not found")
        }
        LedgerError::OptionUnavailable => {
            response::failure(StatusCode::BAD_REQUEST, "Investment option is not available")
        }
        LedgerError::BelowMinimum { minimum } => response::failure(
            StatusCode::BAD_REQUEST,
            &format!("Amount is below the minimum investment of {minimum}"),
        ),
        LedgerError::RecipientNotFound => {
            response::failure(StatusCode::NOT_FOUND, "Recipient not found")
        }
        LedgerError::SelfTransfer => {
            response::failure(StatusCode::BAD_REQUEST, "Cannot transfer to your own account")
        }
        LedgerError::IdempotencyConflict => response::failure(
            StatusCode::CONFLICT,
            "Idempotency key already used for a different operation",
        ),
        LedgerError::Database(e) => {
            error!(error = %e, "Database error in ledger operation");
            response::db_failure()
        }
    }
}

/// POST /fund/deposit - Credit the account.
async fn deposit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FundRequest>,
) -> impl IntoResponse {
    let input = match build_input(user.user_id(), payload) {
        Ok(i) => i,
        Err(resp) => return resp,
    };

    let ledger = LedgerRepository::new((*state.db).clone());
    match ledger.deposit(input).await {
        Ok(outcome) => fund_outcome_response(&outcome),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST /fund/withdraw - Debit the account; overdrafts are rejected.
async fn withdraw(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FundRequest>,
) -> impl IntoResponse {
    let input = match build_input(user.user_id(), payload) {
        Ok(i) => i,
        Err(resp) => return resp,
    };

    let ledger = LedgerRepository::new((*state.db).clone());
    match ledger.withdraw(input).await {
        Ok(outcome) => fund_outcome_response(&outcome),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET /fund/history - Fund operations, newest first.
async fn history(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let ledger = LedgerRepository::new((*state.db).clone());

    match ledger.list_fund_operations(user.user_id()).await {
        Ok(operations) => response::success(operations),
        Err(e) => {
            error!(error = %e, "Database error listing fund operations");
            response::db_failure()
        }
    }
}

pub(crate) use ledger_error_response as map_ledger_error;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parsing() {
        assert_eq!(parse_method("bank"), Some(FundMethod::Bank));
        assert_eq!(parse_method("crypto"), Some(FundMethod::Crypto));
        assert_eq!(parse_method("card"), Some(FundMethod::Card));
        assert_eq!(parse_method("paypal"), None);
        assert_eq!(parse_method("BANK"), None);
    }
}
