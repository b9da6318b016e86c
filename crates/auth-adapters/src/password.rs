//! Argon2 implementation of the `PasswordHasher` port.

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher as _, PasswordVerifier as _,
};
use async_trait::async_trait;
use domains::PasswordHasher;

/// Salted adaptive hashing with the argon2 crate's default parameters.
#[derive(Default)]
pub struct ArgonPasswordHasher;

#[async_trait]
impl PasswordHasher for ArgonPasswordHasher {
    async fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|err| anyhow!("password hashing failed: {err}"))?;
        Ok(hash.to_string())
    }

    /// An unparseable stored hash verifies as `false` rather than erroring;
    /// the caller cannot do anything smarter with a corrupt record.
    async fn verify(&self, plain: &str, hash: &str) -> anyhow::Result<bool> {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(false),
        };
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}
