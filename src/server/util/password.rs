//! PBKDF2 password hashing in PHC string format.

use pbkdf2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Pbkdf2,
};
use rand::RngCore;

use crate::server::error::Error;

const PBKDF2_ROUNDS: u32 = 100_000;
const SALT_LENGTH: usize = 16;

/// Hashes a password with a random salt, returning the PHC string to persist
pub fn hash_password(password: &str) -> Result<String, Error> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::rng().fill_bytes(&mut salt);

    let salt = SaltString::encode_b64(&salt)
        .map_err(|e| Error::PasswordHashError(e.to_string()))?;

    let params = Params {
        rounds: PBKDF2_ROUNDS,
        ..Default::default()
    };

    let hash = Pbkdf2
        .hash_password_customized(password.as_bytes(), None, None, params, &salt)
        .map_err(|e| Error::PasswordHashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string
///
/// A stored value that is not a valid PHC string never matches.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, Error> {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);

            return Ok(false);
        }
    };

    match Pbkdf2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::PasswordHashError(e.to_string())),
    }
}
