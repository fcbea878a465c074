//! Node type for the mock store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A file or directory entry in the mock store.
///
/// Serialized with the field names of the simulated REST API, so listings
/// can be fed straight to a frontend expecting backend responses.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Unique node ID. Stable across renames.
    pub id: Uuid,
    /// Entry name within its parent directory.
    pub name: String,
    /// Whether this node is a directory.
    pub is_directory: bool,
    /// Absolute logical path; equals `parent_path + "/" + name`.
    pub path: String,
    /// File size in bytes (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// MIME type (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Username of the owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
    /// Whether the node lives under the owner's public subtree.
    pub is_public: bool,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Create a directory node.
    pub fn folder(name: impl Into<String>, path: impl Into<String>, owner: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_directory: true,
            path: path.into(),
            size: None,
            mime_type: None,
            owner_username: Some(owner.to_string()),
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a file node.
    pub fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        owner: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_directory: false,
            path: path.into(),
            size: Some(size),
            mime_type: Some(mime_type.into()),
            owner_username: Some(owner.to_string()),
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the node public (lives under the public subtree).
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Refresh the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
