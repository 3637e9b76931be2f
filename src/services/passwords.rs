//! Argon2id hashing and verification helpers.
//!
//! Hashing runs inside `spawn_blocking` because the work factor is tuned to
//! be expensive; running it inline would stall the async runtime.

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task;

use crate::config::SecurityConfig;

pub fn hash_password_sync(password: &str, config: &SecurityConfig) -> Result<String> {
    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// A malformed stored hash verifies as false rather than erroring; login
/// must not leak which part of the credential pair was wrong.
#[must_use]
pub fn verify_password_sync(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

pub async fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let password = password.to_string();
    let config = config.clone();

    task::spawn_blocking(move || hash_password_sync(&password, &config))
        .await
        .context("Password hashing task panicked")?
}

pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();

    task::spawn_blocking(move || verify_password_sync(&password, &stored_hash))
        .await
        .context("Password verification task panicked")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password_sync("hunter22", &fast_config()).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password_sync("hunter22", &hash));
        assert!(!verify_password_sync("hunter23", &hash));
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let config = fast_config();
        let a = hash_password_sync("same-password", &config).unwrap();
        let b = hash_password_sync("same-password", &config).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_verifies_false() {
        assert!(!verify_password_sync("anything", "not-a-phc-string"));
        assert!(!verify_password_sync("anything", ""));
    }
}
