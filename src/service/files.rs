//! Simulated file API for MockDrive.
//!
//! Async wrappers over the mock store that add the configured latency and
//! structured logging, mirroring the file endpoints a frontend talks to:
//! list (private and public context), create folder, delete, rename,
//! upload.

use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::store::{path, Node, SharedStore, ROOT_PATH};
use crate::Result;

use super::Latency;

/// Simulated file API over a shared mock store.
#[derive(Debug, Clone)]
pub struct FileService {
    store: SharedStore,
    list_latency: Latency,
    mutate_latency: Latency,
    upload_latency: Latency,
}

impl FileService {
    /// Create a new FileService over the given store.
    pub fn new(store: SharedStore, sim: &SimulationConfig) -> Self {
        Self {
            store,
            list_latency: Latency::for_list(sim),
            mutate_latency: Latency::for_mutate(sim),
            upload_latency: Latency::for_upload(sim),
        }
    }

    /// List the children of a directory.
    pub async fn list_files(&self, path: &str) -> Result<Vec<Node>> {
        self.list_latency.pause().await;
        debug!(path = %path, "list files");
        self.store.read().list(path)
    }

    /// List the publicly visible children of a directory.
    ///
    /// Paths outside the public subtree (other than the root) are clamped
    /// to the public root, so a public visitor can never wander into
    /// private folders.
    pub async fn list_public_files(&self, path: &str) -> Result<Vec<Node>> {
        self.list_latency.pause().await;
        let store = self.store.read();
        let requested = path::normalize(path);
        let target = if requested == ROOT_PATH || path::is_under(store.public_root(), &requested)
        {
            requested
        } else {
            store.public_root().to_string()
        };
        debug!(path = %target, "list public files");
        store.list_public(&target)
    }

    /// Create a folder under `parent_path`.
    pub async fn create_folder(&self, parent_path: &str, name: &str, owner: &str) -> Result<Node> {
        self.mutate_latency.pause().await;
        let node = self.store.write().create_folder(parent_path, name, owner)?;
        info!(path = %node.path, owner = %owner, "folder created");
        Ok(node)
    }

    /// Delete a file or folder (folders take their subtree with them).
    pub async fn delete_node(&self, node_path: &str) -> Result<()> {
        self.mutate_latency.pause().await;
        self.store.write().delete(node_path)?;
        info!(path = %node_path, "node deleted");
        Ok(())
    }

    /// Rename a file or folder, cascading the path change to descendants.
    pub async fn rename_node(&self, old_path: &str, new_name: &str) -> Result<Node> {
        self.mutate_latency.pause().await;
        let node = self.store.write().rename(old_path, new_name)?;
        info!(old_path = %old_path, new_path = %node.path, "node renamed");
        Ok(node)
    }

    /// Upload a file into `target_path`, replacing a same-name file.
    pub async fn upload_file(
        &self,
        target_path: &str,
        name: &str,
        size: u64,
        mime_type: Option<&str>,
        owner: &str,
    ) -> Result<Node> {
        self.upload_latency.pause().await;
        let node = self
            .store
            .write()
            .upload(target_path, name, size, mime_type, owner)?;
        info!(path = %node.path, size = size, "file uploaded");
        Ok(node)
    }
}
