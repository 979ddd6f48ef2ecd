//! Authentication routes: register, OTP verification, login, token refresh.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tracing::{error, info, warn};
use validator::Validate;

use crate::{AppState, response};
use aurum_core::auth::{generate_referral_code, hash_password, verify_password};
use aurum_core::useragent::parse_user_agent;
use aurum_db::entities::users;
use aurum_db::repositories::{
    CreateUserInput, OtpRepoError, OtpRepository, SessionRepository, UserRepository,
};
use aurum_shared::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, LogoutRequest, RefreshRequest,
    RegisterRequest, ResendOtpRequest, ResetPasswordRequest, TokenPair, UserInfo, VerifyOtpRequest,
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/verify-otp", post(verify_otp))
        .route("/auth/resend-otp", post(resend_otp))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
}

fn user_info(user: &users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        phone: user.phone.clone(),
        referral_code: user.referral_code.clone(),
        email_verified: user.email_verified_at.is_some(),
    }
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
}

/// Creates a session for a fresh refresh token and returns it, logging the
/// device/browser parsed from the User-Agent.
async fn open_session(
    state: &AppState,
    user_id: uuid::Uuid,
    refresh_token: &str,
    headers: &HeaderMap,
) -> Result<(), sea_orm::DbErr> {
    let session_repo = SessionRepository::new((*state.db).clone());
    let ua = headers.get(USER_AGENT).and_then(|h| h.to_str().ok());
    let client = parse_user_agent(ua);
    let expires_at = chrono::Utc::now()
        + chrono::Duration::seconds(state.jwt_service.refresh_token_expires_secs());

    session_repo
        .create(
            user_id,
            refresh_token,
            expires_at,
            client.device,
            client.browser,
            client_ip(headers).as_deref(),
        )
        .await?;

    Ok(())
}

/// Generates the token pair and opens a session; the building block for
/// every flow that logs a user in.
async fn establish_session(
    state: &AppState,
    user: &users::Model,
    headers: &HeaderMap,
) -> Result<AuthResponse, Response> {
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            response::db_failure()
        })?;

    let refresh_token = state
        .jwt_service
        .generate_refresh_token(user.id, &user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to generate refresh token");
            response::db_failure()
        })?;

    open_session(state, user.id, &refresh_token, headers)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create session");
            response::db_failure()
        })?;

    Ok(AuthResponse {
        user: user_info(user),
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}

/// POST /auth/register - Create an unverified account and email an OTP.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return response::failure(
                StatusCode::CONFLICT,
                "An account with this email already exists",
            );
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return response::db_failure();
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return response::db_failure();
        }
    };

    // Referral codes are 8 hex chars; collisions are rare but possible.
    let mut referral_code = generate_referral_code();
    for _ in 0..3 {
        match user_repo.referral_code_exists(&referral_code).await {
            Ok(false) => break,
            Ok(true) => referral_code = generate_referral_code(),
            Err(e) => {
                error!(error = %e, "Database error checking referral code");
                return response::db_failure();
            }
        }
    }

    let user = match user_repo
        .create(CreateUserInput {
            email: payload.email.clone(),
            password_hash,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            phone: payload.phone.clone(),
            referral_code,
        })
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return response::db_failure();
        }
    };

    let otp_repo = OtpRepository::new((*state.db).clone());
    let code = match otp_repo.issue(&user.email).await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to issue verification code");
            return response::db_failure();
        }
    };

    // Email failure is non-fatal: the account exists and the code can be
    // resent.
    if let Err(e) = state
        .email_service
        .send_otp_email(&user.email, &user.first_name, &code)
        .await
    {
        warn!(error = %e, user_id = %user.id, "Failed to send verification email");
    }

    info!(user_id = %user.id, "User registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registration successful, check your email for the verification code",
            "data": { "email": user.email }
        })),
    )
        .into_response()
}

/// POST /auth/verify-otp - Verify the emailed code and log the user in.
async fn verify_otp(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<VerifyOtpRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    let otp_repo = OtpRepository::new((*state.db).clone());
    match otp_repo.verify(&payload.email, &payload.code).await {
        Ok(()) => {}
        Err(OtpRepoError::NoCode) => {
            return response::failure(
                StatusCode::BAD_REQUEST,
                "No verification code found, request a new one",
            );
        }
        Err(OtpRepoError::Rejected(e)) => {
            return response::failure(StatusCode::BAD_REQUEST, &e.to_string());
        }
        Err(OtpRepoError::Database(e)) => {
            error!(error = %e, "Database error verifying code");
            return response::db_failure();
        }
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return response::failure(StatusCode::BAD_REQUEST, "Invalid verification code");
        }
        Err(e) => {
            error!(error = %e, "Database error loading user");
            return response::db_failure();
        }
    };

    if let Err(e) = user_repo.mark_email_verified(user.id).await {
        error!(error = %e, "Failed to mark email verified");
        return response::db_failure();
    }

    match establish_session(&state, &user, &headers).await {
        Ok(mut auth) => {
            auth.user.email_verified = true;
            info!(user_id = %user.id, "Email verified");
            response::success(auth)
        }
        Err(resp) => resp,
    }
}

/// POST /auth/resend-otp - Re-issue a code. Unknown emails get the same
/// generic answer so the endpoint cannot be used for enumeration.
async fn resend_otp(
    State(state): State<AppState>,
    Json(payload): Json<ResendOtpRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    const GENERIC: &str = "If that email is registered, a new code has been sent";

    let user_repo = UserRepository::new((*state.db).clone());
    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) if u.email_verified_at.is_none() => u,
        Ok(_) => return response::success_message(GENERIC),
        Err(e) => {
            error!(error = %e, "Database error loading user");
            return response::db_failure();
        }
    };

    let otp_repo = OtpRepository::new((*state.db).clone());
    let code = match otp_repo.issue(&user.email).await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to issue verification code");
            return response::db_failure();
        }
    };

    if let Err(e) = state
        .email_service
        .send_otp_email(&user.email, &user.first_name, &code)
        .await
    {
        warn!(error = %e, user_id = %user.id, "Failed to send verification email");
    }

    response::success_message(GENERIC)
}

/// POST /auth/login - Authenticate and return tokens.
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    const INVALID: &str = "Invalid email or password";

    let user_repo = UserRepository::new((*state.db).clone());
    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for unknown email");
            return response::failure(StatusCode::UNAUTHORIZED, INVALID);
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return response::db_failure();
        }
    };

    // An inactive account answers exactly like a bad password.
    if !user.is_active {
        info!(user_id = %user.id, "Login attempt for deactivated account");
        return response::failure(StatusCode::UNAUTHORIZED, INVALID);
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return response::failure(StatusCode::UNAUTHORIZED, INVALID);
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return response::db_failure();
        }
    }

    if user.email_verified_at.is_none() {
        return response::failure(
            StatusCode::FORBIDDEN,
            "Email not verified, check your inbox for the verification code",
        );
    }

    match establish_session(&state, &user, &headers).await {
        Ok(auth) => {
            info!(user_id = %user.id, "User logged in");
            response::success(auth)
        }
        Err(resp) => resp,
    }
}

/// POST /auth/refresh - Rotate the refresh token and mint a new access token.
async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(_) => {
            return response::failure(StatusCode::UNAUTHORIZED, "Invalid or expired refresh token");
        }
    };

    let session_repo = SessionRepository::new((*state.db).clone());
    let session = match session_repo.find_by_token(&payload.refresh_token).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return response::failure(StatusCode::UNAUTHORIZED, "Session not found or revoked");
        }
        Err(e) => {
            error!(error = %e, "Database error loading session");
            return response::db_failure();
        }
    };

    if session.expires_at < chrono::Utc::now() {
        return response::failure(StatusCode::UNAUTHORIZED, "Session has expired");
    }

    let access_token = match state
        .jwt_service
        .generate_access_token(claims.user_id(), &claims.email)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return response::db_failure();
        }
    };

    let refresh_token = match state
        .jwt_service
        .generate_refresh_token(claims.user_id(), &claims.email)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return response::db_failure();
        }
    };

    // Rotation: the presented token is revoked and replaced.
    if let Err(e) = session_repo.revoke(session.id).await {
        error!(error = %e, "Failed to revoke session");
        return response::db_failure();
    }
    if let Err(e) = open_session(&state, claims.user_id(), &refresh_token, &headers).await {
        error!(error = %e, "Failed to create rotated session");
        return response::db_failure();
    }

    response::success(TokenPair {
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}

/// POST /auth/logout - Revoke the session for the presented refresh token.
async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> impl IntoResponse {
    let session_repo = SessionRepository::new((*state.db).clone());

    match session_repo.revoke_by_token(&payload.refresh_token).await {
        Ok(_) => response::success_message("Logged out"),
        Err(e) => {
            error!(error = %e, "Database error during logout");
            response::db_failure()
        }
    }
}

/// POST /auth/forgot-password - Enumeration-safe acknowledgement.
async fn forgot_password(Json(payload): Json<ForgotPasswordRequest>) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    response::success_message("If that email is registered, a reset link has been sent")
}

/// POST /auth/reset-password - No reset tokens are issued yet, so every
/// presented token is rejected the same way.
async fn reset_password(Json(payload): Json<ResetPasswordRequest>) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return response::validator_failure(&errors);
    }

    response::failure(StatusCode::BAD_REQUEST, "Invalid or expired reset token")
}
