//! Profile endpoints for the authenticated user.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use tracing::{error, instrument};
use uuid::Uuid;

use super::auth::{
    session::authenticated_user,
    storage::{lookup_user_by_id, update_profile, UpdateOutcome},
    types::{AuthResponse, FieldError, ProfileUpdateRequest, UserResponse},
    validate::{normalize_email, valid_email},
};
use crate::cli::globals::GlobalArgs;

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn me(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
) -> impl IntoResponse {
    let Some(claims_user) = authenticated_user(&headers, &globals) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    // Read the row rather than echoing claims, so a profile update is
    // visible here before the credential is reissued at next login.
    let Ok(user_id) = Uuid::parse_str(&claims_user.id) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match lookup_user_by_id(&pool, user_id).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(UserResponse {
                id: user.id.to_string(),
                name: user.name,
                email: user.email,
            }),
        )
            .into_response(),
        Ok(None) => StatusCode::UNAUTHORIZED.into_response(),
        Err(err) => {
            error!("Error looking up profile: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/me",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Profile updated", body = AuthResponse),
        (status = 400, description = "Validation failed or email already registered", body = AuthResponse),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn update_me(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    payload: Option<Json<ProfileUpdateRequest>>,
) -> impl IntoResponse {
    let Some(claims_user) = authenticated_user(&headers, &globals) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let Ok(user_id) = Uuid::parse_str(&claims_user.id) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let request: ProfileUpdateRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::failure("Missing payload")),
            )
                .into_response()
        }
    };

    let errors = validate_profile_update(&request);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure_with_errors("Validation failed", errors)),
        )
            .into_response();
    }

    let name = request.name.as_deref().map(str::trim);
    let email = request.email.as_deref().map(normalize_email);

    match update_profile(&pool, user_id, name, email.as_deref()).await {
        Ok(UpdateOutcome::Updated(user)) => (
            StatusCode::OK,
            Json(AuthResponse::success_with_user(
                "Profile updated",
                UserResponse {
                    id: user.id.to_string(),
                    name: user.name,
                    email: user.email,
                },
            )),
        )
            .into_response(),
        Ok(UpdateOutcome::Conflict) => (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure_with_errors(
                "User with this email already exists",
                vec![FieldError::new("email", "Email already registered")],
            )),
        )
            .into_response(),
        Ok(UpdateOutcome::NotFound) => StatusCode::UNAUTHORIZED.into_response(),
        Err(err) => {
            error!("Error updating profile: {err:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthResponse::failure("Internal server error")),
            )
                .into_response()
        }
    }
}

fn validate_profile_update(request: &ProfileUpdateRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(name) = &request.name {
        if name.trim().chars().count() < 2 {
            errors.push(FieldError::new(
                "name",
                "Full name must be at least 2 characters",
            ));
        }
    }

    if let Some(email) = &request.email {
        if !valid_email(email.trim()) {
            errors.push(FieldError::new(
                "email",
                "Please enter a valid email address",
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_update_validation_accepts_partial_input() {
        let errors = validate_profile_update(&ProfileUpdateRequest {
            name: None,
            email: None,
        });
        assert!(errors.is_empty());

        let errors = validate_profile_update(&ProfileUpdateRequest {
            name: Some("Jo".to_string()),
            email: None,
        });
        assert!(errors.is_empty());
    }

    #[test]
    fn profile_update_validation_flags_bad_fields() {
        let errors = validate_profile_update(&ProfileUpdateRequest {
            name: Some("J".to_string()),
            email: Some("not-an-email".to_string()),
        });
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
    }
}
