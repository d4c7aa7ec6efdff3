//! Password hashing with Argon2id.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString},
};
use std::sync::LazyLock;

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(password_hash::Error),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(password_hash::Error),
}

/// Hash a password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns an error when Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hashing)
}

/// Check a password against a stored PHC string in constant time.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed or verified.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::MalformedHash(error)),
    }
}

/// Hash of a secret nobody knows, verified in place of a missing account's
/// hash so every refused sign-in pays the same Argon2 cost.
static DECOY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password(&placeholder_password()).ok());

#[cfg(test)]
thread_local! {
    pub(crate) static DECOY_VERIFICATIONS: std::cell::Cell<usize> =
        const { std::cell::Cell::new(0) };
}

/// Run a full verification that can never succeed.
pub fn verify_decoy(password: &str) {
    #[cfg(test)]
    DECOY_VERIFICATIONS.with(|runs| runs.set(runs.get() + 1));

    if let Some(hash) = DECOY_HASH.as_deref() {
        _ = verify_password(password, hash);
    }
}

/// Random secret for accounts that never sign in with a local password.
#[must_use]
pub fn placeholder_password() -> String {
    let mut bytes = [0_u8; 32];

    OsRng.fill_bytes(&mut bytes);

    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
