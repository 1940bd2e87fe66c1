//! Page entry points watched by the route guard.
//!
//! These are thin: the frontend renders the actual pages. `/dashboard` is the
//! protected resource; it fully validates the credential (signature and
//! expiry), so a forged cookie that slipped past the presence-only guard is
//! rejected here.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::auth::session::authenticated_user;
use crate::cli::globals::GlobalArgs;

pub async fn dashboard(headers: HeaderMap, globals: Extension<GlobalArgs>) -> impl IntoResponse {
    match authenticated_user(&headers, &globals) {
        Some(user) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        None => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()).into_response(),
    }
}

pub async fn login_page() -> impl IntoResponse {
    Json(json!({ "page": "login" }))
}

pub async fn signup_page() -> impl IntoResponse {
    Json(json!({ "page": "signup" }))
}
