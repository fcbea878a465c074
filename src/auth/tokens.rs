//! JWT token pairs for the mock auth service.
//!
//! Access and refresh tokens are HS256 JWTs shaped like the ones a real
//! backend would issue: `sub` carries the user ID, `token_type`
//! distinguishes the pair halves, and `jti` identifies a refresh token
//! for revocation.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::{MockDriveError, Result};

/// `token_type` value of access tokens.
pub const TOKEN_TYPE_ACCESS: &str = "access";

/// `token_type` value of refresh tokens.
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// Email of the authenticated user.
    pub email: String,
    /// "access" or "refresh".
    pub token_type: String,
    /// Unique token ID.
    pub jti: String,
    /// Issued-at timestamp (seconds).
    pub iat: u64,
    /// Expiration timestamp (seconds).
    pub exp: u64,
}

/// Access/refresh token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: String,
    /// Long-lived refresh token.
    pub refresh: String,
}

/// Issue a fresh access/refresh pair for a user.
pub fn issue_pair(user_id: Uuid, email: &str, config: &AuthConfig) -> Result<TokenPair> {
    Ok(TokenPair {
        access: issue(
            user_id,
            email,
            TOKEN_TYPE_ACCESS,
            config.access_ttl_secs,
            &config.jwt_secret,
        )?,
        refresh: issue(
            user_id,
            email,
            TOKEN_TYPE_REFRESH,
            config.refresh_ttl_secs,
            &config.jwt_secret,
        )?,
    })
}

fn issue(
    user_id: Uuid,
    email: &str,
    token_type: &str,
    ttl_secs: u64,
    secret: &str,
) -> Result<String> {
    let now = Utc::now().timestamp().max(0) as u64;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        token_type: token_type.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now,
        exp: now + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| MockDriveError::Auth(format!("token signing failed: {e}")))
}

/// Verify a token's signature, expiry, and kind.
///
/// Expiry is checked without leeway; the simulator's clocks cannot skew.
pub fn verify(token: &str, secret: &str, expected_type: &str) -> Result<Claims> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| MockDriveError::Auth("invalid or expired token".to_string()))?;

    if data.claims.token_type != expected_type {
        return Err(MockDriveError::Auth(format!(
            "expected {expected_type} token"
        )));
    }
    Ok(data.claims)
}
