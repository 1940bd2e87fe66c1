//! Session cookie handling and the session/logout endpoints.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use tracing::debug;

use super::{
    token::{verify_token, SESSION_TTL_SECONDS},
    types::UserResponse,
};
use crate::cli::globals::GlobalArgs;

/// Cookie name over plain HTTP.
pub(crate) const SESSION_COOKIE_NAME: &str = "handyhub-session";
/// Cookie name when the frontend is served over HTTPS; the `__Secure-`
/// prefix makes browsers refuse to set it over plain HTTP.
pub(crate) const SECURE_SESSION_COOKIE_NAME: &str = "__Secure-handyhub-session";

fn cookie_name(secure: bool) -> &'static str {
    if secure {
        SECURE_SESSION_COOKIE_NAME
    } else {
        SESSION_COOKIE_NAME
    }
}

/// Build the `Set-Cookie` value carrying the session credential.
pub(crate) fn session_cookie(
    globals: &GlobalArgs,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = globals.cookie_secure();
    let name = cookie_name(secure);
    let mut cookie =
        format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECONDS}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build the `Set-Cookie` value that clears the session cookie.
pub(crate) fn clear_session_cookie(globals: &GlobalArgs) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = globals.cookie_secure();
    let name = cookie_name(secure);
    let mut cookie = format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Pull the session token out of the request cookies, accepting either the
/// http or https cookie variant.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let Some((key, val)) = pair.trim().split_once('=') else {
            continue;
        };
        let (key, val) = (key.trim(), val.trim());
        if (key == SESSION_COOKIE_NAME || key == SECURE_SESSION_COOKIE_NAME) && !val.is_empty() {
            return Some(val.to_string());
        }
    }
    None
}

/// Decode the session cookie into the public identity projection, if valid.
pub(crate) fn authenticated_user(headers: &HeaderMap, globals: &GlobalArgs) -> Option<UserResponse> {
    let token = extract_session_token(headers)?;
    match verify_token(globals.secret(), &token) {
        Ok(claims) => Some(UserResponse {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
        }),
        Err(err) => {
            debug!("Rejected session credential: {err}");
            None
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session is active", body = UserResponse),
        (status = 204, description = "No active session")
    ),
    tag = "auth"
)]
pub async fn session(headers: HeaderMap, globals: Extension<GlobalArgs>) -> impl IntoResponse {
    // Missing or invalid cookies are both "no session"; nothing is leaked
    // about why the credential was rejected.
    match authenticated_user(&headers, &globals) {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(globals: Extension<GlobalArgs>) -> impl IntoResponse {
    // Stateless sessions: clearing the cookie is the whole logout.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(&globals) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}
