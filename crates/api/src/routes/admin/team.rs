//! Admin CRUD for team members.

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
    FieldError, into_error_map, sanitize_string, validate_https_url, validate_image_path,
    validate_int_range,
};
use aurum_db::repositories::{ContentRepository, CreateTeamMemberInput, UpdateTeamMemberInput};

/// Creates the admin team router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/team", get(list).post(create))
        .route("/team/{id}", put(update).delete(remove))
}

/// New team member payload.
#[derive(Debug, Deserialize)]
struct CreateRequest {
    name: String,
    role: String,
    image: String,
    #[serde(default)]
    instagram: Option<String>,
    #[serde(default)]
    sort_order: Option<i32>,
}

/// Team member update payload.
#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    instagram: Option<String>,
    #[serde(default)]
    sort_order: Option<i32>,
    #[serde(default)]
    is_active: Option<bool>,
}

fn validate_create(payload: &CreateRequest) -> Result<CreateTeamMemberInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = sanitize_string(&payload.name, 100);
    if name.is_none() {
        errors.push(FieldError::new("name", "Name is required (max 100 chars)"));
    }

    let role = sanitize_string(&payload.role, 100);
    if role.is_none() {
        errors.push(FieldError::new("role", "Role is required (max 100 chars)"));
    }

    let image = validate_image_path(&payload.image);
    if image.is_none() {
        errors.push(FieldError::new(
            "image",
            "Image must be an /images/ path or an https:// URL",
        ));
    }

    let instagram = match &payload.instagram {
        None => None,
        Some(url) => match validate_https_url(url) {
            Some(v) => Some(v),
            None => {
                errors.push(FieldError::new("instagram", "Must be an https:// URL"));
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

    Ok(CreateTeamMemberInput {
        name: name.unwrap_or_default(),
        role: role.unwrap_or_default(),
        image: image.unwrap_or_default(),
        instagram,
        sort_order,
    })
}

fn validate_update(payload: &UpdateRequest) -> Result<UpdateTeamMemberInput, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut input = UpdateTeamMemberInput::default();

    if let Some(name) = &payload.name {
        match sanitize_string(name, 100) {
            Some(v) => input.name = Some(v),
            None => errors.push(FieldError::new("name", "Name is required (max 100 chars)")),
        }
    }
    if let Some(role) = &payload.role {
        match sanitize_string(role, 100) {
            Some(v) => input.role = Some(v),
            None => errors.push(FieldError::new("role", "Role is required (max 100 chars)")),
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
    if let Some(instagram) = &payload.instagram {
        if instagram.trim().is_empty() {
            input.instagram = Some(None);
        } else {
            match validate_https_url(instagram) {
                Some(v) => input.instagram = Some(Some(v)),
                None => errors.push(FieldError::new("instagram", "Must be an https:// URL")),
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

/// GET /admin/team - Every team member, active or not.
async fn list(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ContentRepository::new((*state.db).clone());

    match repo.list_all_team_members().await {
        Ok(members) => response::success(members),
        Err(e) => {
            error!(error = %e, "Database error listing team members");
            response::db_failure()
        }
    }
}

/// POST /admin/team - Create a team member.
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequest>,
) -> impl IntoResponse {
    let input = match validate_create(&payload) {
        Ok(i) => i,
        Err(errors) => return response::validation_failure(into_error_map(errors)),
    };

    let repo = ContentRepository::new((*state.db).clone());
    match repo.create_team_member(input).await {
        Ok(member) => response::created(member),
        Err(e) => {
            error!(error = %e, "Failed to create team member");
            response::db_failure()
        }
    }
}

/// PUT /admin/team/{id} - Update a team member.
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
    match repo.update_team_member(id, input).await {
        Ok(Some(member)) => response::success(member),
        Ok(None) => response::failure(StatusCode::NOT_FOUND, "Team member not found"),
        Err(e) => {
            error!(error = %e, "Failed to update team member");
            response::db_failure()
        }
    }
}

/// DELETE /admin/team/{id} - Soft-deactivate a team member.
async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = ContentRepository::new((*state.db).clone());

    match repo.deactivate_team_member(id).await {
        Ok(true) => response::success_message("Team member deactivated"),
        Ok(false) => response::failure(StatusCode::NOT_FOUND, "Team member not found"),
        Err(e) => {
            error!(error = %e, "Failed to deactivate team member");
            response::db_failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_validation_collects_all_failures() {
        let payload = CreateRequest {
            name: "  ".to_string(),
            role: "CEO".to_string(),
            image: "http://insecure.example/p.jpg".to_string(),
            instagram: Some("ftp://nope".to_string()),
            sort_order: Some(-1),
        };
        let errors = validate_create(&payload).unwrap_err();
        let map = into_error_map(errors);
        assert!(map.contains_key("name"));
        assert!(map.contains_key("image"));
        assert!(map.contains_key("instagram"));
        assert!(map.contains_key("sort_order"));
        assert!(!map.contains_key("role"));
    }

    #[test]
    fn update_accepts_partial_payload() {
        let payload = UpdateRequest {
            name: Some("New Name".to_string()),
            role: None,
            image: None,
            instagram: Some(String::new()),
            sort_order: None,
            is_active: Some(false),
        };
        let input = validate_update(&payload).unwrap();
        assert_eq!(input.name.as_deref(), Some("New Name"));
        assert_eq!(input.instagram, Some(None));
        assert_eq!(input.is_active, Some(false));
        assert!(input.role.is_none());
    }
}
