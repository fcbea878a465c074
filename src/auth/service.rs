//! Mock authentication service.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{AuthConfig, SimulationConfig};
use crate::{MockDriveError, Result};

use super::password::{hash_password, verify_password};
use super::tokens::{self, TokenPair, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use crate::service::Latency;

/// A mock user account.
#[derive(Debug, Clone)]
struct MockUser {
    id: Uuid,
    email: String,
    username: String,
    first_name: Option<String>,
    last_name: Option<String>,
    password_hash: String,
}

/// Data for registering a mock user.
#[derive(Debug, Clone)]
pub struct NewMockUser {
    /// Login email.
    pub email: String,
    /// Username shown as node owner.
    pub username: String,
    /// Plaintext password (hashed on registration).
    pub password: String,
    /// Optional first name.
    pub first_name: Option<String>,
    /// Optional last name.
    pub last_name: Option<String>,
}

impl NewMockUser {
    /// Create a new registration request.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }

    /// Set the first and last name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }
}

/// User details as the simulated `/auth/user/` endpoint returns them.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetails {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// First name, when set.
    pub first_name: Option<String>,
    /// Last name, when set.
    pub last_name: Option<String>,
}

/// Simulated authentication API.
#[derive(Debug)]
pub struct AuthService {
    /// Users keyed by lowercase email.
    users: RwLock<HashMap<String, MockUser>>,
    /// Revoked refresh token IDs.
    revoked: RwLock<HashSet<String>>,
    config: AuthConfig,
    latency: Latency,
}

impl AuthService {
    /// Create a new AuthService with no users.
    pub fn new(auth: &AuthConfig, sim: &SimulationConfig) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            revoked: RwLock::new(HashSet::new()),
            config: auth.clone(),
            latency: Latency::for_mutate(sim),
        }
    }

    /// Register a user (setup API, not a simulated endpoint).
    pub fn add_user(&self, new_user: NewMockUser) -> Result<UserDetails> {
        let key = new_user.email.to_lowercase();
        let mut users = self.users.write();
        if users.contains_key(&key) {
            return Err(MockDriveError::Conflict(format!(
                "account \"{}\" already exists",
                new_user.email
            )));
        }

        let user = MockUser {
            id: Uuid::new_v4(),
            email: new_user.email,
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: hash_password(&new_user.password)?,
        };
        let details = details_of(&user);
        info!(email = %user.email, username = %user.username, "mock user registered");
        users.insert(key, user);
        Ok(details)
    }

    /// Log in with email and password, yielding a token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        self.latency.pause().await;
        if email.is_empty() || password.is_empty() {
            return Err(MockDriveError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let users = self.users.read();
        let user = users
            .get(&email.to_lowercase())
            .ok_or_else(|| MockDriveError::Auth("invalid credentials".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            debug!(email = %email, "login failed");
            return Err(MockDriveError::Auth("invalid credentials".to_string()));
        }

        info!(email = %email, "login succeeded");
        tokens::issue_pair(user.id, &user.email, &self.config)
    }

    /// Return the user behind a valid access token.
    pub async fn current_user(&self, access_token: &str) -> Result<UserDetails> {
        self.latency.pause().await;
        let claims = tokens::verify(access_token, &self.config.jwt_secret, TOKEN_TYPE_ACCESS)?;

        let users = self.users.read();
        users
            .get(&claims.email.to_lowercase())
            .map(details_of)
            .ok_or_else(|| MockDriveError::Auth("account no longer exists".to_string()))
    }

    /// The username behind a valid access token (node-owner identity).
    pub async fn username_for(&self, access_token: &str) -> Result<String> {
        self.latency.pause().await;
        let claims = tokens::verify(access_token, &self.config.jwt_secret, TOKEN_TYPE_ACCESS)?;

        let users = self.users.read();
        users
            .get(&claims.email.to_lowercase())
            .map(|u| u.username.clone())
            .ok_or_else(|| MockDriveError::Auth("account no longer exists".to_string()))
    }

    /// Exchange a refresh token for a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        self.latency.pause().await;
        let claims = tokens::verify(refresh_token, &self.config.jwt_secret, TOKEN_TYPE_REFRESH)?;

        if self.revoked.read().contains(&claims.jti) {
            return Err(MockDriveError::Auth("token has been revoked".to_string()));
        }

        let users = self.users.read();
        let user = users
            .get(&claims.email.to_lowercase())
            .ok_or_else(|| MockDriveError::Auth("account no longer exists".to_string()))?;
        tokens::issue_pair(user.id, &user.email, &self.config)
    }

    /// Log out by revoking the refresh token.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        self.latency.pause().await;
        let claims = tokens::verify(refresh_token, &self.config.jwt_secret, TOKEN_TYPE_REFRESH)?;
        self.revoked.write().insert(claims.jti);
        info!(email = %claims.email, "logged out");
        Ok(())
    }
}

fn details_of(user: &MockUser) -> UserDetails {
    UserDetails {
        id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    }
}
