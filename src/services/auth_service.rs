//! Bearer token handling.
//!
//! Accounts and login belong to the identity provider. This service only
//! verifies the tokens it signs and turns their claims into a [`Principal`].
//! `issue_token` exists for local development (the `token` CLI command).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::Principal;
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub is_driver: bool,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal::new(claims.sub, claims.username, claims.is_driver)
    }
}

/// Signed token for a principal
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
pub trait AuthService: Send + Sync {
    /// Verify a bearer token and extract the principal it was issued for
    fn verify_token(&self, token: &str) -> AppResult<Principal>;

    /// Sign a token carrying `principal`
    fn issue_token(&self, principal: &Principal) -> AppResult<TokenResponse>;
}

/// HMAC-signed JWT implementation of AuthService.
pub struct Authenticator {
    config: Config,
}

impl Authenticator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl AuthService for Authenticator {
    fn verify_token(&self, token: &str) -> AppResult<Principal> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims.into())
    }

    fn issue_token(&self, principal: &Principal) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: principal.id,
            username: principal.username.clone(),
            is_driver: principal.is_driver,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn authenticator(secret: &str) -> Authenticator {
        Authenticator::new(Config::new(
            "postgres://localhost/test".to_string(),
            secret.to_string(),
            24,
            "127.0.0.1".to_string(),
            3000,
        ))
    }

    #[test]
    fn test_issued_token_carries_principal() {
        let auth = authenticator("test-secret-key-for-testing-only-32chars");
        let principal = Principal::new(Uuid::new_v4(), "mihai.driver", true);

        let token = auth.issue_token(&principal).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 24 * 3600);

        let verified = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(verified, principal);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = authenticator("another-secret-key-of-at-least-32-chars");
        let verifier = authenticator("test-secret-key-for-testing-only-32chars");
        let principal = Principal::new(Uuid::new_v4(), "ana.client", false);

        let token = issuer.issue_token(&principal).unwrap();
        let err = verifier.verify_token(&token.access_token).unwrap_err();
        assert!(matches!(err, AppError::Jwt(_)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let auth = authenticator("test-secret-key-for-testing-only-32chars");
        assert!(auth.verify_token("not-a-jwt").is_err());
    }
}
