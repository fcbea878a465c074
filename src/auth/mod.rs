//! Mock authentication for MockDrive.
//!
//! Simulates a backend's auth surface: login with email
//! and password, JWT access/refresh token pairs, current-user lookup,
//! refresh, and logout with refresh-token revocation. Users live in
//! memory with argon2-hashed passwords.

mod password;
mod service;
mod tokens;

pub use password::{hash_password, verify_password};
pub use service::{AuthService, NewMockUser, UserDetails};
pub use tokens::{Claims, TokenPair, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
