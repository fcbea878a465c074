//! MockDrive - in-memory simulation of a file storage and sharing backend.
//!
//! Fakes the API surface of a file-sharing product (file tree, uploads,
//! sharing permissions, public pages, shell, JWT auth) for UI development
//! and integration testing, with configurable artificial latency.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod store;

pub use app::{Simulator, DEMO_EMAIL, DEMO_PASSWORD};
pub use auth::{
    hash_password, verify_password, AuthService, Claims, NewMockUser, TokenPair, UserDetails,
};
pub use config::Config;
pub use error::{ApiError, MockDriveError, Result};
pub use service::{
    CommandOutcome, FileService, Latency, PermissionLevel, PublicPage, PublicPageService,
    SharePermission, SharedItem, SharingService, ShellService,
};
pub use store::{demo_store, MockStore, Node, SharedStore, DEMO_OWNER, ROOT_PATH};
