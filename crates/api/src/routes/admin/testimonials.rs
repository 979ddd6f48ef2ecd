//! Admin CRUD for testimonials.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, response};
use aurum_core::validation::{
    FieldError, into_error_map, sanitize_string, validate_image_path, validate_int_range,
};
use aurum_db::repositories::{ContentRepository, CreateTestimonialInput, UpdateTestimonialInput};

/// Creates the admin testimonials router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/testimonials", get(list).post(create))
        .route("/testimonials/{id}", put(update).delete(remove))
}

/// New testimonial payload.
#[derive(Debug, Deserialize)]
struct CreateRequest {
    name: String,
    designation: String,
    content: String,
    image: String,
    #[serde(default)]
    star: Option<i32>,
}

/// Testimonial update payload.
#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    designation: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    star: Option<i32>,
    #[serde(default)]
    is_active: Option<bool>,
}

fn validate_create(payload: &CreateRequest) -> Result<CreateTestimonialInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = sanitize_string(&payload.name, 100);
    if name.is_none() {
        errors.push(FieldError::new("name", "Name is required (max 100 chars)"));
    }

    let designation = sanitize_string(&payload.designation, 100);
    if designation.is_none() {
        errors.push(FieldError::new(
            "designation",
            "Designation is required (max 100 chars)",
        ));
    }

    let content = sanitize_string(&payload.content, 2000);
    if content.is_none() {
        errors.push(FieldError::new(
            "content",
            "Content is required (max 2000 chars)",
        ));
    }

    let image = validate_image_path(&payload.image);
    if image.is_none() {
        errors.push(FieldError::new(
            "image",
            "Image must be an /images/ path or an https:// URL",
        ));
    }

    let star = match payload.star {
        None => 5,
        Some(v) => match validate_int_range(v, 1, 5) {
            Some(v) => v,
            None => {
                errors.push(FieldError::new("star", "Star must be between 1 and 5"));
                5
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CreateTestimonialInput {
        name: name.unwrap_or_default(),
        designation: designation.unwrap_or_default(),
        content: content.unwrap_or_default(),
        image: image.unwrap_or_default(),
        star,
    })
}

fn validate_update(payload: &UpdateRequest) -> Result<UpdateTestimonialInput, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut input = UpdateTestimonialInput::default();

    if let Some(name) = &payload.name {
        match sanitize_string(name, 100) {
            Some(v) => input.name = Some(v),
            None => errors.push(FieldError::new("name", "Name is required (max 100 chars)")),
        }
    }
    if let Some(designation) = &payload.designation {
        match sanitize_string(designation, 100) {
            Some(v) => input.designation = Some(v),
            None => errors.push(FieldError::new(
                "designation",
                "Designation is required (max 100 chars)",
            )),
        }
    }
    if let Some(content) = &payload.content {
        match sanitize_string(content, 2000) {
            Some(v) => input.content = Some(v),
            None => errors.push(FieldError::new(
                "content",
                "Content is required (max 2000 chars)",
            )),
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
    if let Some(star) = payload.star {
        match validate_int_range(star, 1, 5) {
            Some(v) => input.star = Some(v),
            None => errors.push(FieldError::new("star", "Star must be between 1 and 5")),
        }
    }
    input.is_active = payload.is_active;

    if errors.is_empty() { Ok(input) } else { Err(errors) }
}

/// GET /admin/testimonials - Every testimonial, active or not.
async fn list(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ContentRepository::new((*state.db).clone());

    match repo.list_all_testimonials().await {
        Ok(entries) => response::success(entries),
        Err(e) => {
            error!(error = %e, "Database error listing testimonials");
            response::db_failure()
        }
    }
}

/// POST /admin/testimonials - Create a testimonial.
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequest>,
) -> impl IntoResponse {
    let input = match validate_create(&payload) {
        Ok(i) => i,
        Err(errors) => return response::validation_failure(into_error_map(errors)),
    };

    let repo = ContentRepository::new((*state.db).clone());
    match repo.create_testimonial(input).await {
        Ok(entry) => response::created(entry),
        Err(e) => {
            error!(error = %e, "Failed to create testimonial");
            response::db_failure()
        }
    }
}

/// PUT /admin/testimonials/{id} - Update a testimonial.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequest>,
) -> impl IntoResponse {
    let input = match validate_update(&payload) {
        Ok(i) => i,
        Err(errors) => return response::validation_failure(into_error_map(errors)),
    };

    let repo = ContentRepository::new((*state.db).clone());
    match repo.update_testimonial(id, input).await {
        Ok(Some(entry)) => response::success(entry),
        Ok(None) => response::failure(StatusCode::NOT_FOUND, "Testimonial not found"),
        Err(e) => {
            error!(error = %e, "Failed to update testimonial");
            response::db_failure()
        }
    }
}

/// DELETE /admin/testimonials/{id} - Soft-deactivate a testimonial.
async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = ContentRepository::new((*state.db).clone());

    match repo.deactivate_testimonial(id).await {
        Ok(true) => response::success_message("Testimonial deactivated"),
        Ok(false) => response::failure(StatusCode::NOT_FOUND, "Testimonial not found"),
        Err(e) => {
            error!(error = %e, "Failed to deactivate testimonial");
            response::db_failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_rating_bounds() {
        let payload = CreateRequest {
            name: "Jane".to_string(),
            designation: "Investor".to_string(),
            content: "Great platform".to_string(),
            image: "/images/testimonials/jane.jpg".to_string(),
            star: Some(6),
        };
        let errors = validate_create(&payload).unwrap_err();
        let map = into_error_map(errors);
        assert!(map.contains_key("star"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn star_defaults_to_five() {
        let payload = CreateRequest {
            name: "Jane".to_string(),
            designation: "Investor".to_string(),
            content: "Great platform".to_string(),
            image: "/images/testimonials/jane.jpg".to_string(),
            star: None,
        };
        let input = validate_create(&payload).unwrap();
        assert_eq!(input.star, 5);
    }
}
