//! Route guard: redirects requests based on authentication state before any
//! page logic runs.
//!
//! The guard only checks cookie *presence*; it never validates signatures or
//! touches the database, so it stays side-effect-free and fast. A forged but
//! present cookie passes here and is rejected downstream when the protected
//! handler decodes the claims.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::session::extract_session_token;

/// Paths that require an authenticated session.
const PROTECTED_PATHS: &[&str] = &["/dashboard"];
/// Auth entry points, pointless to show to an authenticated user.
const AUTH_PATHS: &[&str] = &["/login", "/signup", "/auth"];

/// Default landing page after authentication.
const DASHBOARD_PATH: &str = "/dashboard";
/// Login entry point, target of unauthenticated redirects.
const LOGIN_PATH: &str = "/login";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum GuardDecision {
    Pass,
    /// Redirect to the login page, preserving the original URL.
    ToLogin { location: String },
    /// Redirect an already-authenticated user to the dashboard.
    ToDashboard,
}

pub(crate) fn decide(path: &str, authenticated: bool, original_url: &str) -> GuardDecision {
    if PROTECTED_PATHS.iter().any(|p| path.starts_with(p)) && !authenticated {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("callbackUrl", original_url)
            .finish();
        return GuardDecision::ToLogin {
            location: format!("{LOGIN_PATH}?{query}"),
        };
    }

    if AUTH_PATHS.iter().any(|p| path.starts_with(p)) && authenticated {
        return GuardDecision::ToDashboard;
    }

    GuardDecision::Pass
}

fn has_session_cookie(headers: &HeaderMap) -> bool {
    extract_session_token(headers).is_some()
}

/// Axum middleware wrapper around [`decide`].
pub async fn guard(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let original_url = request.uri().to_string();
    let authenticated = has_session_cookie(request.headers());

    match decide(&path, authenticated, &original_url) {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::ToLogin { location } => Redirect::temporary(&location).into_response(),
        GuardDecision::ToDashboard => Redirect::temporary(DASHBOARD_PATH).into_response(),
    }
}
