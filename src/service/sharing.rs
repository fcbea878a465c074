//! Simulated sharing permissions for MockDrive.
//!
//! Files (never directories) can be shared with other users at view or
//! edit level. Share records follow node IDs, so renames leave them
//! intact; records whose node has been deleted are pruned lazily when
//! listings are built.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::store::{Node, SharedStore};
use crate::{MockDriveError, Result};

use super::Latency;

/// Level of access granted by a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Read-only access.
    View,
    /// Read and modify access.
    Edit,
}

impl PermissionLevel {
    /// String form used by the simulated API ("view" / "edit").
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::View => "view",
            PermissionLevel::Edit => "edit",
        }
    }
}

/// A sharing grant on a file node.
#[derive(Debug, Clone, Serialize)]
pub struct SharePermission {
    /// Unique grant ID.
    pub id: Uuid,
    /// ID of the shared node.
    pub node_id: Uuid,
    /// User the node is shared with.
    pub shared_with_username: String,
    /// Granted access level.
    pub permission_level: PermissionLevel,
    /// User who granted the share.
    pub granted_by_username: String,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

/// A node shared with a user, as returned by "shared with me" listings.
#[derive(Debug, Clone, Serialize)]
pub struct SharedItem {
    /// The shared node (with its current path).
    pub node: Node,
    /// The grant giving access to it.
    pub permission: SharePermission,
}

/// Simulated sharing API.
#[derive(Debug)]
pub struct SharingService {
    store: SharedStore,
    /// Node ID -> grants on that node.
    shares: RwLock<HashMap<Uuid, Vec<SharePermission>>>,
    latency: Latency,
}

impl SharingService {
    /// Create a new SharingService over the given store.
    pub fn new(store: SharedStore, sim: &SimulationConfig) -> Self {
        Self {
            store,
            shares: RwLock::new(HashMap::new()),
            latency: Latency::for_mutate(sim),
        }
    }

    /// Share the file at `node_path` with another user.
    ///
    /// Directories cannot be shared; sharing with the owner is rejected.
    /// Re-sharing with the same user updates the level in place.
    pub async fn share(
        &self,
        node_path: &str,
        shared_with: &str,
        level: PermissionLevel,
        granted_by: &str,
    ) -> Result<SharePermission> {
        self.latency.pause().await;
        let node = self.lookup(node_path)?;

        if node.is_directory {
            return Err(MockDriveError::Validation(
                "directories cannot be shared".to_string(),
            ));
        }
        if node.owner_username.as_deref() == Some(shared_with) {
            return Err(MockDriveError::Validation(format!(
                "\"{shared_with}\" already owns this file"
            )));
        }

        let mut shares = self.shares.write();
        let grants = shares.entry(node.id).or_default();

        if let Some(existing) = grants
            .iter_mut()
            .find(|g| g.shared_with_username == shared_with)
        {
            existing.permission_level = level;
            info!(path = %node.path, user = %shared_with, level = %level.as_str(), "share updated");
            return Ok(existing.clone());
        }

        let grant = SharePermission {
            id: Uuid::new_v4(),
            node_id: node.id,
            shared_with_username: shared_with.to_string(),
            permission_level: level,
            granted_by_username: granted_by.to_string(),
            created_at: Utc::now(),
        };
        grants.push(grant.clone());
        info!(path = %node.path, user = %shared_with, level = %level.as_str(), "share granted");
        Ok(grant)
    }

    /// Remove a user's grant on the file at `node_path`.
    pub async fn revoke(&self, node_path: &str, shared_with: &str) -> Result<()> {
        self.latency.pause().await;
        let node = self.lookup(node_path)?;

        let mut shares = self.shares.write();
        let grants = shares.get_mut(&node.id).ok_or_else(|| {
            MockDriveError::NotFound(format!("share for \"{shared_with}\" on {node_path}"))
        })?;

        let before = grants.len();
        grants.retain(|g| g.shared_with_username != shared_with);
        if grants.len() == before {
            return Err(MockDriveError::NotFound(format!(
                "share for \"{shared_with}\" on {node_path}"
            )));
        }
        info!(path = %node.path, user = %shared_with, "share revoked");
        Ok(())
    }

    /// List the grants on the node at `node_path`.
    pub async fn shares_for(&self, node_path: &str) -> Result<Vec<SharePermission>> {
        self.latency.pause().await;
        let node = self.lookup(node_path)?;
        Ok(self.shares.read().get(&node.id).cloned().unwrap_or_default())
    }

    /// List everything shared with `username`, with current node details.
    ///
    /// Grants pointing at deleted nodes are dropped here.
    pub async fn shared_with(&self, username: &str) -> Result<Vec<SharedItem>> {
        self.latency.pause().await;
        let store = self.store.read();
        let mut shares = self.shares.write();

        // Lazy cascade: forget grants whose node is gone.
        shares.retain(|node_id, _| store.find_by_id(*node_id).is_some());

        let mut items: Vec<SharedItem> = shares
            .values()
            .flatten()
            .filter(|g| g.shared_with_username == username)
            .filter_map(|g| {
                store.find_by_id(g.node_id).map(|node| SharedItem {
                    node,
                    permission: g.clone(),
                })
            })
            .collect();
        items.sort_by(|a, b| a.permission.created_at.cmp(&b.permission.created_at));
        Ok(items)
    }

    /// Check that `username` may access the node at `node_path` with the
    /// required level. The owner always passes.
    pub async fn ensure_permission(
        &self,
        node_path: &str,
        username: &str,
        required: PermissionLevel,
    ) -> Result<()> {
        self.latency.pause().await;
        let node = self.lookup(node_path)?;

        if node.owner_username.as_deref() == Some(username) {
            return Ok(());
        }

        let shares = self.shares.read();
        let granted = shares
            .get(&node.id)
            .into_iter()
            .flatten()
            .find(|g| g.shared_with_username == username)
            .map(|g| g.permission_level);

        match granted {
            Some(level) if level >= required => Ok(()),
            _ => Err(MockDriveError::Permission(format!(
                "\"{username}\" has no {} access to {node_path}",
                required.as_str()
            ))),
        }
    }

    fn lookup(&self, node_path: &str) -> Result<Node> {
        self.store
            .read()
            .find(node_path)
            .ok_or_else(|| MockDriveError::NotFound(format!("node {node_path}")))
    }
}
