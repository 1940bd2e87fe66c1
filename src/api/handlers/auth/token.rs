//! Session credential issuance and validation.
//!
//! Credentials are HS256 JWTs signed with the process-wide secret. A valid,
//! unexpired signature is sufficient; the claims embedded at issuance are
//! trusted for the lifetime of the token, so profile changes only become
//! visible in the claims after re-login.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

/// Session validity window: 7 days.
pub(crate) const SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct Claims {
    /// Subject identity id.
    pub(crate) sub: String,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Issue a signed session credential for the given identity.
pub(crate) fn issue_token(
    secret: &SecretString,
    user_id: &str,
    email: &str,
    name: &str,
) -> Result<String, TokenError> {
    issue_token_at(secret, user_id, email, name, now_unix_seconds())
}

/// Issue a credential with an explicit issuance time.
pub(crate) fn issue_token_at(
    secret: &SecretString,
    user_id: &str,
    email: &str,
    name: &str,
    issued_at: i64,
) -> Result<String, TokenError> {
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        iat: issued_at,
        exp: issued_at + SESSION_TTL_SECONDS,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| TokenError::Invalid)
}

/// Verify a presented credential and return its claims.
///
/// Rejects a credential signed with a different secret, a tampered or
/// malformed payload, and anything at or past its expiry. No partial trust.
pub(crate) fn verify_token(secret: &SecretString, token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;

    // The expiry bound is closed: jsonwebtoken only rejects once `exp < now`,
    // so a credential presented at exactly `exp` needs this check.
    if data.claims.exp <= now_unix_seconds() {
        return Err(TokenError::Expired);
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("an-adequately-long-test-signing-secret".to_string())
    }

    #[test]
    fn issue_and_verify_round_trip() -> Result<(), TokenError> {
        let token = issue_token(&secret(), "user-1", "a@b.com", "Jo")?;
        let claims = verify_token(&secret(), &token)?;

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.name, "Jo");
        assert_eq!(claims.exp, claims.iat + SESSION_TTL_SECONDS);
        Ok(())
    }

    #[test]
    fn tokens_issued_at_different_times_differ() -> Result<(), TokenError> {
        let first = issue_token_at(&secret(), "user-1", "a@b.com", "Jo", 1_700_000_000)?;
        let second = issue_token_at(&secret(), "user-1", "a@b.com", "Jo", 1_700_000_001)?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn rejects_expired_token() -> Result<(), TokenError> {
        let issued_at = now_unix_seconds() - SESSION_TTL_SECONDS - 10;
        let token = issue_token_at(&secret(), "user-1", "a@b.com", "Jo", issued_at)?;
        assert_eq!(verify_token(&secret(), &token), Err(TokenError::Expired));
        Ok(())
    }

    #[test]
    fn rejects_token_at_exact_expiry() -> Result<(), TokenError> {
        // exp == now at issuance; the window is closed at its upper bound.
        let issued_at = now_unix_seconds() - SESSION_TTL_SECONDS;
        let token = issue_token_at(&secret(), "user-1", "a@b.com", "Jo", issued_at)?;
        assert_eq!(verify_token(&secret(), &token), Err(TokenError::Expired));
        Ok(())
    }

    #[test]
    fn accepts_token_near_end_of_window() -> Result<(), TokenError> {
        let issued_at = now_unix_seconds() - SESSION_TTL_SECONDS + 60;
        let token = issue_token_at(&secret(), "user-1", "a@b.com", "Jo", issued_at)?;
        assert!(verify_token(&secret(), &token).is_ok());
        Ok(())
    }

    #[test]
    fn rejects_wrong_secret() -> Result<(), TokenError> {
        let token = issue_token(&secret(), "user-1", "a@b.com", "Jo")?;
        let other = SecretString::from("a-different-signing-secret-entirely".to_string());
        assert_eq!(verify_token(&other, &token), Err(TokenError::Invalid));
        Ok(())
    }

    #[test]
    fn rejects_tampered_payload() -> Result<(), TokenError> {
        // Splice the payload of one token onto the signature of another.
        let victim = issue_token_at(&secret(), "user-1", "a@b.com", "Jo", 1_700_000_000)?;
        let donor = issue_token_at(&secret(), "user-2", "x@y.com", "Mallory", 1_700_000_000)?;

        let victim_parts: Vec<&str> = victim.split('.').collect();
        let donor_parts: Vec<&str> = donor.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            victim_parts[0], donor_parts[1], victim_parts[2]
        );

        assert_eq!(verify_token(&secret(), &forged), Err(TokenError::Invalid));
        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            verify_token(&secret(), "not-a-token"),
            Err(TokenError::Invalid)
        );
        assert_eq!(verify_token(&secret(), ""), Err(TokenError::Invalid));
    }
}
