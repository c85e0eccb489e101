// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Hashes are stored as `pbkdf2-sha256$<iterations>$<salt>$<hash>` with
//! unpadded standard base64, so the iteration count can change without
//! invalidating existing accounts.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use std::num::NonZeroU32;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const CREDENTIAL_LEN: usize = digest::SHA256_OUTPUT_LEN;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> anyhow::Result<String> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| anyhow::anyhow!("PBKDF2 iteration count must be non-zero"))?;

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| anyhow::anyhow!("Failed to generate password salt"))?;

    let mut credential = [0u8; CREDENTIAL_LEN];
    pbkdf2::derive(
        ALGORITHM,
        iterations,
        &salt,
        password.as_bytes(),
        &mut credential,
    );

    Ok(format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(credential)
    ))
}

/// Check a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    let [scheme, iterations, salt, credential] = parts.as_slice() else {
        return false;
    };
    if *scheme != SCHEME {
        return false;
    }

    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(credential)) = (
        STANDARD_NO_PAD.decode(salt),
        STANDARD_NO_PAD.decode(credential),
    ) else {
        return false;
    };

    pbkdf2::verify(
        ALGORITHM,
        iterations,
        &salt,
        password.as_bytes(),
        &credential,
    )
    .is_ok()
}

/// [`hash_password`] on the blocking pool, so a PBKDF2 run never stalls a
/// runtime worker.
pub async fn hash_password_blocking(password: String, iterations: u32) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, iterations))
        .await
        .map_err(|e| anyhow::anyhow!("password hashing task failed: {e}"))?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: String, stored: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| anyhow::anyhow!("password verification task failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse", 1_000).unwrap();
        assert!(hash.starts_with("pbkdf2-sha256$1000$"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same", 1_000).unwrap();
        let b = hash_password("same", 1_000).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "plaintext"));
        assert!(!verify_password("x", "bcrypt$10$abc$def"));
        assert!(!verify_password("x", "pbkdf2-sha256$0$abc$def"));
        assert!(!verify_password("x", "pbkdf2-sha256$1000$***$def"));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(hash_password("x", 0).is_err());
    }

    #[tokio::test]
    async fn test_blocking_pool_variants_agree() {
        let hash = hash_password_blocking("correct horse".to_string(), 1_000)
            .await
            .unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(verify_password_blocking("correct horse".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("wrong horse".to_string(), hash)
            .await
            .unwrap());
        assert!(hash_password_blocking("x".to_string(), 0).await.is_err());
    }
}
