//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;

/// Minimum signing key length for HS256 session tokens.
const MIN_SIGNING_KEY_LEN: usize = 32;

/// PBKDF2 rounds used for new password hashes in production.
pub const DEFAULT_PASSWORD_ITERATIONS: u32 = 100_000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS; an `https` URL marks cookies `Secure`
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Lifetime of a login session in days
    pub session_ttl_days: u32,
    /// Load the demo users/skills/requests at startup
    pub seed_demo_data: bool,
    /// PBKDF2 iteration count for newly hashed passwords
    pub password_iterations: u32,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Default config for testing only.
    ///
    /// Uses a low PBKDF2 iteration count so tests stay fast.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            session_ttl_days: 30,
            seed_demo_data: false,
            password_iterations: 1_000,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .trim()
            .as_bytes()
            .to_vec();
        if jwt_signing_key.len() < MIN_SIGNING_KEY_LEN {
            return Err(ConfigError::Invalid(
                "JWT_SIGNING_KEY",
                format!("must be at least {MIN_SIGNING_KEY_LEN} bytes"),
            ));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: parse_var("PORT", 8080)?,
            session_ttl_days: parse_var("SESSION_TTL_DAYS", 30)?,
            seed_demo_data: parse_var("SEED_DEMO_DATA", false)?,
            password_iterations: parse_var("PASSWORD_ITERATIONS", DEFAULT_PASSWORD_ITERATIONS)?,
            jwt_signing_key,
        })
    }

    /// Whether session cookies must carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, format!("cannot parse {raw:?}"))),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so everything touching them
    // lives in a single test.
    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "short");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("JWT_SIGNING_KEY", _))
        ));

        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!!");
        env::set_var("SESSION_TTL_DAYS", "7");
        env::set_var("SEED_DEMO_DATA", "true");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.session_ttl_days, 7);
        assert!(config.seed_demo_data);
        assert_eq!(config.port, 8080);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("PORT", _))
        ));
        env::remove_var("PORT");
    }

    #[test]
    fn test_secure_cookies_follow_frontend_scheme() {
        let mut config = Config::test_default();
        assert!(!config.secure_cookies());

        config.frontend_url = "https://skillswap.dev".to_string();
        assert!(config.secure_cookies());
    }
}
