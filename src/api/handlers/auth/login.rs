//! Login: verify credentials and start a session.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use tracing::{debug, error, instrument};

use super::{
    password::verify_password,
    session::session_cookie,
    storage::lookup_user_by_email,
    token::issue_token,
    types::{AuthResponse, FieldError, LoginRequest, UserResponse},
    validate::{normalize_email, validate_login},
};
use crate::cli::globals::GlobalArgs;

/// Shared by the unknown-email and wrong-password branches so the two are
/// indistinguishable to a caller probing for accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Malformed input", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AuthResponse),
        (status = 500, description = "Internal failure", body = AuthResponse),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::failure("Missing payload")),
            )
                .into_response()
        }
    };

    let errors = validate_login(&request);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure_with_errors("Validation failed", errors)),
        )
            .into_response();
    }

    let email = normalize_email(&request.email);

    let user = match lookup_user_by_email(&pool, &email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("Login attempt for unknown email");
            return unauthorized("email");
        }
        Err(err) => {
            error!("Error looking up user: {err:?}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthResponse::failure("Internal server error")),
            )
                .into_response();
        }
    };

    if !verify_password(&request.password, &user.password_hash) {
        debug!("Password mismatch");
        return unauthorized("password");
    }

    let token = match issue_token(globals.secret(), &user.id.to_string(), &user.email, &user.name)
    {
        Ok(token) => token,
        Err(err) => {
            error!("Error issuing session credential: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthResponse::failure("Internal server error")),
            )
                .into_response();
        }
    };

    let mut headers = HeaderMap::new();
    if let Ok(cookie) = session_cookie(&globals, &token) {
        headers.insert(SET_COOKIE, cookie);
    }

    (
        StatusCode::OK,
        headers,
        Json(AuthResponse::success_with_user(
            "Login successful",
            UserResponse {
                id: user.id.to_string(),
                name: user.name,
                email: user.email,
            },
        )),
    )
        .into_response()
}

fn unauthorized(field: &str) -> axum::response::Response {
    // Same top-level message either way; only the annotated field differs.
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthResponse::failure_with_errors(
            INVALID_CREDENTIALS,
            vec![FieldError::new(field, INVALID_CREDENTIALS)],
        )),
    )
        .into_response()
}
