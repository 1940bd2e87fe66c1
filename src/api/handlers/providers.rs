//! Service-provider onboarding.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use tracing::{error, instrument};

use super::auth::{
    password::hash_password,
    storage::{insert_provider, ProviderInsert, ProviderOutcome},
    types::{AuthResponse, FieldError, ProviderSignupRequest},
    validate::{normalize_email, valid_email, valid_password},
};

#[utoipa::path(
    post,
    path = "/api/providers",
    request_body = ProviderSignupRequest,
    responses(
        (status = 201, description = "Service provider created", body = AuthResponse),
        (status = 400, description = "Validation failed or email already exists", body = AuthResponse),
        (status = 500, description = "Internal failure", body = AuthResponse),
    ),
    tag = "handyhub"
)]
#[instrument(skip_all)]
pub async fn provider_signup(
    pool: Extension<PgPool>,
    payload: Option<Json<ProviderSignupRequest>>,
) -> impl IntoResponse {
    let request: ProviderSignupRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::failure("Missing payload")),
            )
                .into_response()
        }
    };

    let errors = validate_provider(&request);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure_with_errors("Validation failed", errors)),
        )
            .into_response();
    }

    let email = normalize_email(&request.email);

    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Error hashing password: {err:?}");
            return internal_error();
        }
    };

    let provider = ProviderInsert {
        name: request.name.trim(),
        email: &email,
        password_hash: &password_hash,
        phone: &request.phone,
        age: request.age,
        experience: request.experience,
        service_type: &request.service_type,
        location: &request.location,
        city: &request.city,
        address: &request.address,
        bio: &request.bio,
    };

    match insert_provider(&pool, &provider).await {
        Ok(ProviderOutcome::Created) => (
            StatusCode::CREATED,
            Json(AuthResponse::success(
                "Service Provider created successfully",
            )),
        )
            .into_response(),
        Ok(ProviderOutcome::Conflict) => (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure_with_errors(
                "Email already exists",
                vec![FieldError::new("email", "Email already registered")],
            )),
        )
            .into_response(),
        Err(err) => {
            error!("Error inserting service provider: {err:?}");
            internal_error()
        }
    }
}

fn validate_provider(request: &ProviderSignupRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if request.name.trim().chars().count() < 2 {
        errors.push(FieldError::new(
            "name",
            "Full name must be at least 2 characters",
        ));
    }

    if !valid_email(request.email.trim()) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address",
        ));
    }

    if !valid_password(&request.password) {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters with uppercase, lowercase, and number",
        ));
    }

    if request.age <= 0 {
        errors.push(FieldError::new("age", "Age must be a positive number"));
    }

    if request.experience < 0 {
        errors.push(FieldError::new(
            "experience",
            "Experience cannot be negative",
        ));
    }

    errors
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AuthResponse::failure("Internal server error")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProviderSignupRequest {
        ProviderSignupRequest {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "Abcdefg1".to_string(),
            phone: "555-0100".to_string(),
            age: 34,
            experience: 10,
            service_type: "plumber".to_string(),
            location: "Downtown".to_string(),
            city: "Springfield".to_string(),
            address: "12 Main St".to_string(),
            bio: "Licensed plumber".to_string(),
        }
    }

    #[test]
    fn validate_provider_accepts_complete_input() {
        assert!(validate_provider(&request()).is_empty());
    }

    #[test]
    fn validate_provider_flags_numeric_fields() {
        let mut bad = request();
        bad.age = 0;
        bad.experience = -1;
        let fields: Vec<String> = validate_provider(&bad)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["age", "experience"]);
    }
}
