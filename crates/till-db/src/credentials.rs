//! # Credentials
//!
//! Argon2 password hashing for stored cashier accounts.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) carrying their own salt and
//! parameters. Verification is constant-time inside the `password-hash`
//! crate. Both operations are CPU-heavy, so async callers go through the
//! `*_blocking` variants, which run on tokio's blocking pool.
//!
//! ```text
//! login("cashier", pw)
//!      │
//!      ├── user found ──────► verify(pw, user.password_hash)
//!      │
//!      └── user missing ────► verify(pw, DUMMY_HASH), always false
//!                             (same work either way)
//! ```

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::warn;

use crate::error::{DbError, DbResult};

/// Hash of a throwaway secret, computed once, verified against when the
/// username does not exist.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash.
///
/// A malformed stored hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(e) => {
            warn!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hash_password("till-dummy-credential").ok())
        .as_deref()
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String) -> DbResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| DbError::Internal(format!("Hashing task failed: {}", e)))?
}

/// Checks a login attempt on the blocking pool.
///
/// `stored_hash` is `None` when the username is unknown; the password is
/// then verified against a dummy hash and the result is always `false`.
pub async fn verify_login_blocking(password: String, stored_hash: Option<String>) -> DbResult<bool> {
    tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            if let Some(dummy) = dummy_hash() {
                let _ = verify_password(&password, dummy);
            }
            false
        }
    })
    .await
    .map_err(|e| DbError::Internal(format!("Verification task failed: {}", e)))
}
