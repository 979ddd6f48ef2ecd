//! Admin CRUD for investment options.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, response};
use aurum_core::validation::{
    FieldError, into_error_map, sanitize_string, validate_https_url, validate_image_path,
    validate_int_range,
};
use aurum_db::repositories::{CreateOptionInput, InvestmentRepository, UpdateOptionInput};

/// Creates the admin investment-options router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/investment-options", get(list).post(create))
        .route("/investment-options/{id}", put(update).delete(remove))
}

/// New option payload.
#[derive(Debug, Deserialize)]
struct CreateRequest {
    title: String,
    image: String,
    min_investment: Decimal,
    description: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    sort_order: Option<i32>,
}

/// Option update payload.
#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    min_investment: Option<Decimal>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    sort_order: Option<i32>,
    #[serde(default)]
    is_active: Option<bool>,
}

fn validate_create(payload: &CreateRequest) -> Result<CreateOptionInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = sanitize_string(&payload.title, 200);
    if title.is_none() {
        errors.push(FieldError::new("title", "Title is required (max 200 chars)"));
    }

    let image = validate_image_path(&payload.image);
    if image.is_none() {
        errors.push(FieldError::new(
            "image",
            "Image must be an /images/ path or an https:// URL",
        ));
    }

    if payload.min_investment <= Decimal::ZERO {
        errors.push(FieldError::new(
            "min_investment",
            "Minimum investment must be greater than zero",
        ));
    }

    let description = sanitize_string(&payload.description, 5000);
    if description.is_none() {
        errors.push(FieldError::new(
            "description",
            "Description is required (max 5000 chars)",
        ));
    }

    let link = match &payload.link {
        None => None,
        Some(url) => match validate_https_url(url) {
            Some(v) => Some(v),
            None => {
                errors.push(FieldError::new("link", "Must be an https:// URL"));
                None
            }
        },
    };

    let sort_order = match payload.sort_order {
        None => 0,
        Some(v) => match validate_int_range(v, 0, 10_000) {
            Some(v) => v,
            None => {
                errors.push(FieldError::new(
                    "sort_order",
                    "Sort order must be between 0 and 10000",
                ));
                0
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CreateOptionInput {
        title: title.unwrap_or_default(),
        image: image.unwrap_or_default(),
        min_investment: payload.min_investment,
        description: description.unwrap_or_default(),
        link,
        sort_order,
    })
}

fn validate_update(payload: &UpdateRequest) -> Result<UpdateOptionInput, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut input = UpdateOptionInput::default();

    if let Some(title) = &payload.title {
        match sanitize_string(title, 200) {
            Some(v) => input.title = Some(v),
            None => errors.push(FieldError::new("title", "Title is required (max 200 chars)")),
        }
    }
    if let Some(image) = &payload.image {
        match validate_image_path(image) {
            Some(v) => input.image = Some(v),
            None => errors.push(FieldError::new(
                "image",
                "Image must be an /images/ path or an https:// URL",
            )),
        }
    }
    if let Some(min_investment) = payload.min_investment {
        if min_investment > Decimal::ZERO {
            input.min_investment = Some(min_investment);
        } else {
            errors.push(FieldError::new(
                "min_investment",
                "Minimum investment must be greater than zero",
            ));
        }
    }
    if let Some(description) = &payload.description {
        match sanitize_string(description, 5000) {
            Some(v) => input.description = Some(v),
            None => errors.push(FieldError::new(
                "description",
                "Description is required (max 5000 chars)",
            )),
        }
    }
    if let Some(link) = &payload.link {
        if link.trim().is_empty() {
            input.link = Some(None);
        } else {
            match validate_https_url(link) {
                Some(v) => input.link = Some(Some(v)),
                None => errors.push(FieldError::new("link", "Must be an https:// URL")),
            }
        }
    }
    if let Some(sort_order) = payload.sort_order {
        match validate_int_range(sort_order, 0, 10_000) {
            Some(v) => input.sort_order = Some(v),
            None => errors.push(FieldError::new(
                "sort_order",
                "Sort order must be between 0 and 10000",
            )),
        }
    }
    input.is_active = payload.is_active;

    if errors.is_empty() { Ok(input) } else { Err(errors) }
}

/// GET /admin/investment-options - Every option, active or not.
async fn list(State(state): State<AppState>) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo.list_all_options().await {
        Ok(options) => response::success(options),
        Err(e) => {
            error!(error = %e, "Database error listing investment options");
            response::db_failure()
        }
    }
}

/// POST /admin/investment-options - Create an option.
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequest>,
) -> impl IntoResponse {
    let input = match validate_create(&payload) {
        Ok(i) => i,
        Err(errors) => return response::validation_failure(into_error_map(errors)),
    };

    let repo = InvestmentRepository::new((*state.db).clone());
    match repo.create_option(input).await {
        Ok(option) => response::created(option),
        Err(e) => {
            error!(error = %e, "Failed to create investment option");
            response::db_failure()
        }
    }
}

/// PUT /admin/investment-options/{id} - Update an option.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequest>,
) -> impl IntoResponse {
    let input = match validate_update(&payload) {
        Ok(i) => i,
        Err(errors) => return response::validation_failure(into_error_map(errors)),
    };

    let repo = InvestmentRepository::new((*state.db).clone());
    match repo.update_option(id, input).await {
        Ok(Some(option)) => response::success(option),
        Ok(None) => response::failure(StatusCode::NOT_FOUND, "Investment option not found"),
        Err(e) => {
            error!(error = %e, "Failed to update investment option");
            response::db_failure()
        }
    }
}

/// DELETE /admin/investment-options/{id} - Soft-deactivate an option;
/// existing positions keep their reference.
async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo.deactivate_option(id).await {
        Ok(true) => response::success_message("Investment option deactivated"),
        Ok(false) => response::failure(StatusCode::NOT_FOUND, "Investment option not found"),
        Err(e) => {
            error!(error = %e, "Failed to deactivate investment option");
            response::db_failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn create_rejects_non_positive_minimum() {
        let payload = CreateRequest {
            title: "Skyline Tower".to_string(),
            image: "/images/investments/tower.jpg".to_string(),
            min_investment: dec!(0),
            description: "A tower".to_string(),
            link: None,
            sort_order: None,
        };
        let errors = validate_create(&payload).unwrap_err();
        let map = into_error_map(errors);
        assert!(map.contains_key("min_investment"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn update_clears_link_on_empty_string() {
        let payload = UpdateRequest {
            title: None,
            image: None,
            min_investment: Some(dec!(250)),
            description: None,
            link: Some(String::new()),
            sort_order: None,
            is_active: None,
        };
        let input = validate_update(&payload).unwrap();
        assert_eq!(input.link, Some(None));
        assert_eq!(input.min_investment, Some(dec!(250)));
    }
}
