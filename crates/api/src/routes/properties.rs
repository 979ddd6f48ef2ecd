//! Public property listing routes.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::error;
use uuid::Uuid;

use crate::{AppState, response};
use aurum_db::repositories::PropertyRepository;

/// How many properties the landing page carousel shows.
const FEATURED_LIMIT: u64 = 6;

/// Creates the properties router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list))
        .route("/properties/featured", get(featured))
        .route("/properties/{id}", get(get_one))
}

/// GET /properties - Active listings, newest first.
async fn list(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());

    match repo.list_active().await {
        Ok(properties) => response::success(properties),
        Err(e) => {
            error!(error = %e, "Database error listing properties");
            response::db_failure()
        }
    }
}

/// GET /properties/featured - Featured listings for the landing page.
async fn featured(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());

    match repo.list_featured(FEATURED_LIMIT).await {
        Ok(properties) => response::success(properties),
        Err(e) => {
            error!(error = %e, "Database error listing featured properties");
            response::db_failure()
        }
    }
}

/// GET /properties/{id} - A single active listing.
async fn get_one(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());

    match repo.find_active(id).await {
        Ok(Some(property)) => response::success(property),
        Ok(None) => response::failure(StatusCode::NOT_FOUND, "Property not found"),
        Err(e) => {
            error!(error = %e, "Database error loading property");
            response::db_failure()
        }
    }
}
