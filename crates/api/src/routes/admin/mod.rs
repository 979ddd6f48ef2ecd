//! Admin content CRUD, gated by the admin-key middleware.
//!
//! Create and update payloads are validated field by field and failures
//! come back as a `field -> message` map.

use axum::Router;

use crate::AppState;

pub mod options;
pub mod team;
pub mod testimonials;

/// Creates the admin router (mounted under `/admin`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(team::routes())
        .merge(testimonials::routes())
        .merge(options::routes())
}
