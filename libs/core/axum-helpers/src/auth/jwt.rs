use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token lifetime. Both access and refresh tokens live 30 days.
pub const TOKEN_TTL_DAYS: i64 = 30;

/// Error type for token creation and verification.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by an access token.
///
/// Mirrors the customer profile so handlers can respond without a
/// database round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // Subject (customer ID)
    pub email: String, // Customer email
    pub name: String,  // Customer display name
    pub exp: i64,      // Expiration time
    pub iat: i64,      // Issued at
    pub jti: String,   // JWT ID
}

/// Claims carried by a refresh token. Only the subject id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Stateless JWT issuer/verifier (HS256).
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new JWT auth instance.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let jwt_auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!("JWT auth initialized");
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create an access token (30 days) carrying the customer profile.
    pub fn create_access_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Create a refresh token (30 days) carrying only the customer id.
    pub fn create_refresh_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify access token signature and decode claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Verify refresh token signature and decode claims.
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        let token_data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("unit-test-secret-that-is-long-enough!!"))
    }

    #[test]
    fn test_access_token_roundtrip() {
        let auth = auth();
        let token = auth
            .create_access_token("65f0a1b2c3d4e5f6a7b8c9d0", "jane@example.com", "Jane Doe")
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "65f0a1b2c3d4e5f6a7b8c9d0");
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.name, "Jane Doe");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_access_token_expiry_is_thirty_days() {
        let auth = auth();
        let token = auth
            .create_access_token("id", "a@b.c", "A B")
            .unwrap();
        let claims = auth.verify_token(&token).unwrap();

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let auth = auth();
        let token = auth.create_refresh_token("65f0a1b2c3d4e5f6a7b8c9d0").unwrap();
        let claims = auth.verify_refresh_token(&token).unwrap();
        assert_eq!(claims.sub, "65f0a1b2c3d4e5f6a7b8c9d0");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let auth = auth();
        let token = auth.create_access_token("id", "a@b.c", "A B").unwrap();

        let other = JwtAuth::new(&JwtConfig::new("a-completely-different-secret-value!!"));
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let auth = auth();
        assert!(auth.verify_token("not-a-jwt").is_err());
    }
}
