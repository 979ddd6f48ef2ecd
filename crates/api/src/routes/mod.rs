//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::{admin::admin_middleware, auth::auth_middleware},
};

pub mod admin;
pub mod auth;
pub mod content;
pub mod fund;
pub mod health;
pub mod investments;
pub mod properties;
pub mod settings;
pub mod support;
pub mod transactions;
pub mod transfer;

/// Creates the API router: public routes, bearer-protected routes, and the
/// admin surface behind the static key.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(fund::routes())
        .merge(investments::protected_routes())
        .merge(transactions::routes())
        .merge(transfer::routes())
        .merge(settings::routes())
        .merge(support::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = admin::routes().layer(middleware::from_fn_with_state(
        state.clone(),
        admin_middleware,
    ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(properties::routes())
        .merge(content::routes())
        .merge(investments::public_routes())
        .merge(protected_routes)
        .nest("/admin", admin_routes)
}
