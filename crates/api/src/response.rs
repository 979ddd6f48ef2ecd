//! Response envelope helpers.
//!
//! Every route answers with `{success, data?, message?, errors?}`; the HTTP
//! status carries the primary signal. Datastore failures always collapse to
//! a generic 500 message so no internals leak into responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use validator::ValidationErrors;

/// 200 with a data payload.
pub fn success<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": data })),
    )
        .into_response()
}

/// 201 with a data payload.
pub fn created<T: Serialize>(data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": data })),
    )
        .into_response()
}

/// 200 with a message and no data.
pub fn success_message(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": message })),
    )
        .into_response()
}

/// Failure with the given status and message.
pub fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

/// 400 with a field-to-message errors map.
pub fn validation_failure<T: Serialize>(errors: T) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "message": "Validation failed",
            "errors": errors
        })),
    )
        .into_response()
}

/// 400 built from `validator` derive output.
pub fn validator_failure(errors: &ValidationErrors) -> Response {
    let map: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map_or_else(|| "Invalid value".to_string(), ToString::to_string);
            ((*field).to_string(), json!(message))
        })
        .collect();

    validation_failure(map)
}

/// Generic 500 for datastore failures. The detail belongs in server logs.
pub fn db_failure() -> Response {
    failure(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::Validate;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_envelope_shape() {
        let response = success(json!({ "balance": "100.00" }));
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["balance"], "100.00");
    }

    #[tokio::test]
    async fn failure_envelope_shape() {
        let response = failure(StatusCode::NOT_FOUND, "Ticket not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Ticket not found");
    }

    #[tokio::test]
    async fn validator_failure_collects_field_messages() {
        #[derive(Validate)]
        struct Payload {
            #[validate(email(message = "Must be a valid email address"))]
            email: String,
        }

        let payload = Payload {
            email: "nope".to_string(),
        };
        let errors = payload.validate().unwrap_err();

        let response = validator_failure(&errors);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"]["email"], "Must be a valid email address");
    }

    #[tokio::test]
    async fn db_failure_is_generic() {
        let response = db_failure();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "An internal error occurred");
    }
}
