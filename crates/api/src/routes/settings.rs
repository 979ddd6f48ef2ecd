//! Settings routes: preferences, password, sessions, account lifecycle.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, middleware::auth::AuthUser, response};
use aurum_core::auth::{hash_password, verify_password};
use aurum_db::repositories::{
    SessionRepository, SettingsRepository, UpdateSettingsInput, UserRepository,
};

/// Creates the settings router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings).patch(patch_settings))
        .route("/settings/password", put(change_password))
        .route("/settings/account", delete(deactivate_account))
        .route("/settings/sessions", get(list_sessions))
        .route("/settings/sessions/{id}", delete(revoke_session))
}

/// Partial settings update payload.
#[derive(Debug, Deserialize)]
struct SettingsPatch {
    #[serde(default)]
    email_notifications: Option<bool>,
    #[serde(default)]
    push_notifications: Option<bool>,
    #[serde(default)]
    marketing_emails: Option<bool>,
    #[serde(default)]
    login_alerts: Option<bool>,
    #[serde(default)]
    session_timeout: Option<i32>,
}

/// Password change payload.
#[derive(Debug, Deserialize, Validate)]
struct PasswordChangeRequest {
    current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    new_password: String,
}

/// Account deactivation payload.
#[derive(Debug, Deserialize)]
struct DeactivateRequest {
    password: String,
}

/// GET /settings - The caller's preferences, defaults materialized on
/// first read.
async fn get_settings(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = SettingsRepository::new((*state.db).clone());

    match repo.get_or_create(user.user_id()).await {
        Ok(settings) => response::success(settings),
        Err(e) => {
            error!(error = %e, "Database error loading settings");
            response::db_failure()
        }
    }
}

/// PATCH /settings - Partial preferences update.
async fn patch_settings(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SettingsPatch>,
) -> impl IntoResponse {
    if let Some(timeout) = payload.session_timeout {
        if !(5..=1440).contains(&timeout) {
            return response::validation_failure(json!({
                "session_timeout": "Session timeout must be between 5 and 1440 minutes"
            }));
        }
    }

    let repo = SettingsRepository::new((*state.db).clone());
    let input = UpdateSettingsInput {
        email_notifications: payload.email_notifications,
        push_notifications: payload.push_notifications,
        marketing_emails: payload.marketing_emails,
        login_alerts: payload.login_alerts,
        session_timeout: payload.session_timeout,
    };

    match repo.update(user.user_id(), input).await {
        Ok(settings) => response::success(settings),
        Err(e) => {
            error!(error = %e, "Database error updating settings");
            response::db_failure()
        }
    }
}

/// PUT /settings/password - Change the password; every session is revoked
/// so old refresh tokens die with the old password.
async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PasswordChangeRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let account = match user_repo.find_by_id(user.user_id()).await {
        Ok(Some(u)) => u,
        Ok(None) => return response::failure(StatusCode::NOT_FOUND, "Account not found"),
        Err(e) => {
            error!(error = %e, "Database error loading user");
            return response::db_failure();
        }
    };

    match verify_password(&payload.current_password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return response::failure(StatusCode::BAD_REQUEST, "Current password is incorrect");
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return response::db_failure();
        }
    }

    let new_hash = match hash_password(&payload.new_password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return response::db_failure();
        }
    };

    if let Err(e) = user_repo.update_password(account.id, &new_hash).await {
        error!(error = %e, "Failed to update password");
        return response::db_failure();
    }

    let session_repo = SessionRepository::new((*state.db).clone());
    if let Err(e) = session_repo.revoke_all_user_sessions(account.id).await {
        error!(error = %e, "Failed to revoke sessions after password change");
        return response::db_failure();
    }

    info!(user_id = %account.id, "Password changed");
    response::success_message("Password updated, please log in again")
}

/// DELETE /settings/account - Soft-deactivate and revoke every session.
async fn deactivate_account(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<DeactivateRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());
    let account = match user_repo.find_by_id(user.user_id()).await {
        Ok(Some(u)) => u,
        Ok(None) => return response::failure(StatusCode::NOT_FOUND, "Account not found"),
        Err(e) => {
            error!(error = %e, "Database error loading user");
            return response::db_failure();
        }
    };

    match verify_password(&payload.password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return response::failure(StatusCode::BAD_REQUEST, "Password is incorrect");
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return response::db_failure();
        }
    }

    if let Err(e) = user_repo.deactivate(account.id).await {
        error!(error = %e, "Failed to deactivate account");
        return response::db_failure();
    }

    let session_repo = SessionRepository::new((*state.db).clone());
    if let Err(e) = session_repo.revoke_all_user_sessions(account.id).await {
        error!(error = %e, "Failed to revoke sessions on deactivation");
        return response::db_failure();
    }

    info!(user_id = %account.id, "Account deactivated");
    response::success_message("Account deactivated")
}

/// GET /settings/sessions - Active sessions, newest first.
async fn list_sessions(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = SessionRepository::new((*state.db).clone());

    match repo.get_user_sessions(user.user_id()).await {
        Ok(sessions) => {
            // Token hashes stay server-side.
            let data: Vec<_> = sessions
                .iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "device": s.device,
                        "browser": s.browser,
                        "ip_address": s.ip_address,
                        "created_at": s.created_at,
                        "expires_at": s.expires_at,
                    })
                })
                .collect();
            response::success(data)
        }
        Err(e) => {
            error!(error = %e, "Database error listing sessions");
            response::db_failure()
        }
    }
}

/// DELETE /settings/sessions/{id} - Revoke one of the caller's sessions.
async fn revoke_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SessionRepository::new((*state.db).clone());

    // Scope the lookup to the caller's own sessions.
    let sessions = match repo.get_user_sessions(user.user_id()).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Database error listing sessions");
            return response::db_failure();
        }
    };

    if !sessions.iter().any(|s| s.id == id) {
        return response::failure(StatusCode::NOT_FOUND, "Session not found");
    }

    match repo.revoke(id).await {
        Ok(()) => response::success_message("Session revoked"),
        Err(e) => {
            error!(error = %e, "Failed to revoke session");
            response::db_failure()
        }
    }
}
