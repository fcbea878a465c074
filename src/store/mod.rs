//! Mock hierarchical store for MockDrive.
//!
//! This module provides the in-memory directory tree that fakes backend
//! responses:
//! - path-keyed tree with list/create/upload/rename/delete operations
//! - path arithmetic (normalize, join, resolve)
//! - a seeded demo dataset

mod node;
pub mod path;
mod seed;
mod tree;

use std::sync::Arc;

use parking_lot::RwLock;

pub use node::Node;
pub use path::ROOT_PATH;
pub use seed::{demo_store, DEMO_OWNER};
pub use tree::MockStore;

/// Maximum length for file and folder names (in characters).
pub const MAX_NAME_LENGTH: usize = 255;

/// Store handle shared between the simulated services.
pub type SharedStore = Arc<RwLock<MockStore>>;

/// Wrap a store for sharing between services.
pub fn shared(store: MockStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}
