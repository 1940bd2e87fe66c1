//! # Handyhub
//!
//! `handyhub` is the backend for a home-services marketplace: credential
//! signup and login, stateless session cookies, and service-provider
//! onboarding over PostgreSQL.
//!
//! ## Sessions
//!
//! Authentication issues an HS256-signed JWT carrying the user's id, email,
//! and display name. The token lives in an HTTP-only cookie for seven days;
//! there is no server-side session table, so claims embedded at issuance are
//! trusted until the token expires or the cookie is cleared.
//!
//! ## Email uniqueness
//!
//! Emails are normalized (trimmed, lowercased) before storage. The `UNIQUE`
//! constraint on `users.email` is the invariant guardian: concurrent signups
//! with the same address race at the INSERT and the loser gets a conflict,
//! never a second row.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
