//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set in a release build or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        Self::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        )
    }

    /// Build a configuration from explicit values.
    ///
    /// # Panics
    /// Panics if `jwt_secret` is shorter than the minimum length.
    pub fn new(
        database_url: String,
        jwt_secret: String,
        jwt_expiration_hours: i64,
        server_host: String,
        server_port: u16,
    ) -> Self {
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            server_host,
            server_port,
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new(
            DEFAULT_DATABASE_URL.to_string(),
            "test-secret-key-for-testing-only-32chars".to_string(),
            DEFAULT_JWT_EXPIRATION_HOURS,
            "127.0.0.1".to_string(),
            8080,
        )
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let output = format!("{:?}", config());
        assert!(!output.contains("test-secret"));
        assert!(!output.contains("postgres://"));
        assert!(output.contains("8080"));
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(config().server_addr(), "127.0.0.1:8080");
    }

    #[test]
    #[should_panic(expected = "at least 32")]
    fn test_short_secret_rejected() {
        Config::new(
            DEFAULT_DATABASE_URL.to_string(),
            "short".to_string(),
            1,
            DEFAULT_SERVER_HOST.to_string(),
            DEFAULT_SERVER_PORT,
        );
    }
}
