use anyhow::{anyhow, bail};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;

/// Hashes the provided password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    if password.is_empty() {
        bail!("Password cannot be empty.");
    }

    Argon2::default()
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("Failed to generate a password hash: {}", err))
}

/// Verifies the provided password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|err| anyhow!("Failed to parse a password hash: {}", err))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
