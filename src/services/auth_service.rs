//! Authentication service - password login and JWT issuing/verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::UserService;
use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{password::DUMMY_HASH, Password, UserDetails};
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub authorities: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize, ToSchema)]
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
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check a username/password pair and issue a token
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(details: &UserDetails, config: &Config) -> AppResult<TokenResponse> {
    let hours = config.jwt_expiration_hours;
    let lifetime = Duration::try_hours(hours)
        .filter(|d| *d > Duration::zero())
        .ok_or_else(|| AppError::internal(format!("Invalid token lifetime: {} hours", hours)))?;
    let expires_in = hours
        .checked_mul(SECONDS_PER_HOUR)
        .ok_or_else(|| AppError::internal(format!("Invalid token lifetime: {} hours", hours)))?;

    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(lifetime)
        .ok_or_else(|| AppError::internal(format!("Invalid token lifetime: {} hours", hours)))?;

    let claims = Claims {
        sub: details.username.clone(),
        authorities: details.authorities(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in,
    })
}

/// Concrete implementation of AuthService backed by the user service.
pub struct Authenticator {
    user_service: Arc<dyn UserService>,
    config: Config,
}

impl Authenticator {
    pub fn new(user_service: Arc<dyn UserService>, config: Config) -> Self {
        Self {
            user_service,
            config,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let details = match self.user_service.load_user_by_username(username).await {
            Ok(details) => Some(details),
            Err(AppError::UserNotFound(_)) => None,
            Err(e) => return Err(e),
        };

        // Unknown users still pay for one hash verification
        let stored = Password::from_hash(
            details
                .as_ref()
                .map_or(DUMMY_HASH, |d| d.password_hash.as_str()),
        );
        let password_valid = stored.verify(password);

        match details {
            Some(details) if password_valid => {
                tracing::info!(username = %details.username, "Login succeeded");
                generate_token(&details, &self.config)
            }
            _ => {
                tracing::warn!(username, "Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
