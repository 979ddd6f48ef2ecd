//! Public marketing-site content routes.

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::error;

use crate::{AppState, response};
use aurum_db::repositories::ContentRepository;

/// Creates the content router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/content/team", get(team))
        .route("/content/testimonials", get(testimonials))
}

/// GET /content/team - Active team members in display order.
async fn team(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ContentRepository::new((*state.db).clone());

    match repo.list_active_team_members().await {
        Ok(members) => response::success(members),
        Err(e) => {
            error!(error = %e, "Database error listing team members");
            response::db_failure()
        }
    }
}

/// GET /content/testimonials - Active testimonials, newest first.
async fn testimonials(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ContentRepository::new((*state.db).clone());

    match repo.list_active_testimonials().await {
        Ok(entries) => response::success(entries),
        Err(e) => {
            error!(error = %e, "Database error listing testimonials");
            response::db_failure()
        }
    }
}
