//! Signup: validate, create the identity, and start a session.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use tracing::{error, instrument};

use super::{
    password::hash_password,
    session::session_cookie,
    storage::{insert_user, InsertOutcome},
    token::issue_token,
    types::{AuthResponse, FieldError, SignupRequest},
    validate::{normalize_email, validate_signup},
};
use crate::cli::globals::GlobalArgs;

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = AuthResponse),
        (status = 400, description = "Validation failed or email already registered", body = AuthResponse),
        (status = 500, description = "Internal failure", body = AuthResponse),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn signup(
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    payload: Option<Json<SignupRequest>>,
) -> impl IntoResponse {
    let request: SignupRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::failure("Missing payload")),
            )
                .into_response()
        }
    };

    let errors = validate_signup(&request);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure_with_errors("Validation failed", errors)),
        )
            .into_response();
    }

    let name = request.name.trim();
    let email = normalize_email(&request.email);

    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Error hashing password: {err:?}");
            return internal_error();
        }
    };

    // The INSERT itself is the uniqueness check; no lookup beforehand, so
    // concurrent signups with the same email cannot both succeed.
    match insert_user(&pool, name, &email, &password_hash).await {
        Ok(outcome) => outcome_response(&globals, outcome),
        Err(err) => {
            error!("Error inserting user: {err:?}");
            internal_error()
        }
    }
}

/// Map the insert outcome to the HTTP response: a created identity starts a
/// session, a replayed email gets the conflict envelope.
fn outcome_response(globals: &GlobalArgs, outcome: InsertOutcome) -> Response {
    let user = match outcome {
        InsertOutcome::Created(user) => user,
        InsertOutcome::Conflict => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::failure_with_errors(
                    "User with this email already exists",
                    vec![FieldError::new("email", "Email already registered")],
                )),
            )
                .into_response();
        }
    };

    let token = match issue_token(globals.secret(), &user.id.to_string(), &user.email, &user.name)
    {
        Ok(token) => token,
        Err(err) => {
            error!("Error issuing session credential: {err}");
            return internal_error();
        }
    };

    let mut headers = HeaderMap::new();
    if let Ok(cookie) = session_cookie(globals, &token) {
        headers.insert(SET_COOKIE, cookie);
    }

    (
        StatusCode::CREATED,
        headers,
        Json(AuthResponse::success(
            "Account created and signed in successfully",
        )),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AuthResponse::failure("Internal server error")),
    )
        .into_response()
}
