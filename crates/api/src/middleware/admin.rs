//! Admin-key middleware for the `/api/admin` surface.
//!
//! Admin routes are gated by a static `X-Admin-Key` header. The comparison
//! goes through SHA-256 digests so it runs in time independent of where the
//! two keys first differ.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::AppState;

/// Header carrying the admin key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

fn keys_match(presented: &str, expected: &str) -> bool {
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a == b
}

/// Rejects requests whose `X-Admin-Key` header does not match the
/// configured key.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match presented {
        Some(key) if keys_match(key, &state.admin_api_key) => next.run(request).await,
        _ => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "success": false,
                "message": "Admin access denied"
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_keys_pass() {
        assert!(keys_match("secret-key", "secret-key"));
    }

    #[test]
    fn different_keys_fail() {
        assert!(!keys_match("secret-key", "other-key"));
        assert!(!keys_match("", "secret-key"));
    }
}
