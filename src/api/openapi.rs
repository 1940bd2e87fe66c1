use super::handlers::{auth, health, me, providers};
use utoipa::openapi::{tag::TagBuilder, InfoBuilder, OpenApiBuilder};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI spec.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and included in the generated `OpenAPI` spec.
/// Page routes watched by the guard (`/dashboard`, `/login`, `/signup`) are
/// registered outside and intentionally not documented.
pub(crate) fn api_router() -> OpenApiRouter {
    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the route to OpenAPI.
    OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth::signup::signup))
        .routes(routes!(auth::login::login))
        .routes(routes!(auth::session::session))
        .routes(routes!(auth::session::logout))
        .routes(routes!(me::me, me::update_me))
        .routes(routes!(providers::provider_signup))
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    let tags = vec![
        TagBuilder::new()
            .name("handyhub")
            .description(Some("Home services marketplace API"))
            .build(),
        TagBuilder::new()
            .name("auth")
            .description(Some("Signup, login, and session management"))
            .build(),
    ];

    OpenApiBuilder::new().info(info).tags(Some(tags)).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_uses_cargo_metadata() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn openapi_carries_tags() {
        let spec = openapi();
        let tags = spec.tags.expect("tags should be set");
        let names: Vec<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
        assert!(names.contains(&"handyhub"));
        assert!(names.contains(&"auth"));
    }

    #[test]
    fn openapi_documents_auth_routes() {
        let spec = openapi();
        let paths = &spec.paths.paths;
        assert!(paths.contains_key("/api/auth/signup"));
        assert!(paths.contains_key("/api/auth/login"));
        assert!(paths.contains_key("/api/auth/logout"));
        assert!(paths.contains_key("/api/auth/session"));
        assert!(paths.contains_key("/api/me"));
        assert!(paths.contains_key("/api/providers"));
        assert!(paths.contains_key("/health"));
    }
}
