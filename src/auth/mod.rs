pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::database::models::Admin;
use crate::types::Role;

pub use password::{hash_password, verify_password, PasswordError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    pub admin_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Missing token")]
    Missing,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("Token lifetime of {0} minutes is out of range")]
    InvalidLifetime(u64),
}

/// Failure of [`TokenService::authorize`]; maps onto 401 and 403.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Role '{actual}' cannot access a route requiring '{required}'")]
    Forbidden { required: Role, actual: Role },
}

/// Issues and verifies the bearer tokens handed to admins on login.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    pub fn new(config: &SecurityConfig) -> Result<Self, TokenError> {
        let minutes = config.jwt_expiry_minutes;
        let ttl = i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or(TokenError::InvalidLifetime(minutes))?;

        Self::with_secret(&config.jwt_secret, ttl)
    }

    pub fn with_secret(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.required_spec_claims = ["exp".to_string()].into_iter().collect();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Signs an admin assertion valid for the configured lifetime.
    pub fn issue(&self, admin: &Admin) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Generation("expiry overflows the calendar".to_string()))?;
        let claims = Claims {
            username: admin.username.clone(),
            admin_id: admin.admin_id,
            role: Role::Admin,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }

    /// Verifies the token and requires the asserted role to match.
    ///
    /// Both the admin route guard and the anonymous message path go through
    /// here, so a token is never accepted by one and rejected by the other.
    pub fn authorize(&self, token: Option<&str>, required: Role) -> Result<Claims, AuthError> {
        let token = token.ok_or(TokenError::Missing)?;
        let claims = self.verify(token)?;

        if claims.role != required {
            return Err(AuthError::Forbidden {
                required,
                actual: claims.role,
            });
        }

        Ok(claims)
    }
}
