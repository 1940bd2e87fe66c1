//! One-way password hashing.

use tracing::error;

/// bcrypt work factor; salts are random per call so repeated hashing of the
/// same input never produces the same output.
const BCRYPT_COST: u32 = 12;

/// Hash a plaintext password for storage.
///
/// # Errors
///
/// Returns an error if bcrypt fails, which only happens on resource
/// exhaustion or an out-of-range cost.
pub(crate) fn hash_password(password: &str) -> anyhow::Result<String> {
    Ok(bcrypt::hash(password, BCRYPT_COST)?)
}

/// Verify a plaintext password against a stored hash.
///
/// Malformed hashes verify as `false` rather than surfacing an error; the
/// comparison itself is bcrypt's constant-time check.
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matched) => matched,
        Err(err) => {
            error!("Password verification failed on malformed hash: {err}");
            false
        }
    }
}
