//! The mock hierarchical store.
//!
//! An in-memory directory tree keyed by absolute path strings, used to
//! fake backend responses. The store maps each directory path to the
//! ordered list of its child nodes; leaf files appear only in their
//! parent's list. Invariants:
//!
//! - every directory node referenced in a parent's child list also exists
//!   as a key in the store;
//! - a node's `path` always equals its parent key joined with its name.
//!
//! The store itself is synchronous. Simulated latency lives in the
//! service layer.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{MockDriveError, Result};

use super::node::Node;
use super::path::{self, ROOT_PATH};
use super::MAX_NAME_LENGTH;

/// In-memory directory tree keyed by absolute path.
#[derive(Debug)]
pub struct MockStore {
    /// Directory path -> ordered child nodes.
    entries: HashMap<String, Vec<Node>>,
    /// Subtree whose nodes count as publicly visible.
    public_root: String,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Create an empty store containing only the root directory,
    /// with "/public" as the public subtree.
    pub fn new() -> Self {
        Self::with_public_root("/public")
    }

    /// Create an empty store with a custom public subtree root.
    pub fn with_public_root(public_root: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(ROOT_PATH.to_string(), Vec::new());
        Self {
            entries,
            public_root: path::normalize(public_root),
        }
    }

    /// The path of the public subtree root.
    pub fn public_root(&self) -> &str {
        &self.public_root
    }

    /// Return a copy of the children at `path`.
    pub fn list(&self, path: &str) -> Result<Vec<Node>> {
        let path = path::normalize(path);
        self.entries
            .get(&path)
            .cloned()
            .ok_or_else(|| MockDriveError::NotFound(format!("directory {path}")))
    }

    /// Return a copy of the children at `path`, filtered to publicly
    /// visible nodes.
    pub fn list_public(&self, path: &str) -> Result<Vec<Node>> {
        let children = self.list(path)?;
        Ok(children
            .into_iter()
            .filter(|n| n.is_public || path::is_under(&self.public_root, &n.path))
            .collect())
    }

    /// Whether `path` exists as a directory key.
    pub fn dir_exists(&self, path: &str) -> bool {
        self.entries.contains_key(&path::normalize(path))
    }

    /// Look up a node by its full path in its parent's listing.
    ///
    /// The root has no parent entry and therefore no node.
    pub fn find(&self, path: &str) -> Option<Node> {
        let path = path::normalize(path);
        let parent = path::parent(&path);
        self.entries
            .get(&parent)?
            .iter()
            .find(|n| n.path == path)
            .cloned()
    }

    /// Look up a node by its ID, anywhere in the tree.
    pub fn find_by_id(&self, id: Uuid) -> Option<Node> {
        self.entries
            .values()
            .flatten()
            .find(|n| n.id == id)
            .cloned()
    }

    /// Create a directory under `parent_path`.
    ///
    /// Fails with NotFound if the parent is absent and Conflict if a
    /// directory with the same name already exists under it. A file with
    /// the same name does not conflict.
    pub fn create_folder(&mut self, parent_path: &str, name: &str, owner: &str) -> Result<Node> {
        validate_name(name)?;

        let parent = path::normalize(parent_path);
        let full_path = path::join(&parent, name);
        let is_public = path::is_under(&self.public_root, &full_path);

        let children = self
            .entries
            .get_mut(&parent)
            .ok_or_else(|| MockDriveError::NotFound(format!("parent path {parent}")))?;

        if children.iter().any(|n| n.name == name && n.is_directory) {
            return Err(MockDriveError::Conflict(format!(
                "folder \"{name}\" already exists in {parent}"
            )));
        }

        let node = Node::folder(name, &full_path, owner).with_public(is_public);
        children.push(node.clone());
        self.entries.insert(full_path, Vec::new());
        Ok(node)
    }

    /// Add a file under `target_path`, replacing any existing file with
    /// the same name.
    ///
    /// When `mime_type` is absent it is guessed from the file name,
    /// falling back to `application/octet-stream`.
    pub fn upload(
        &mut self,
        target_path: &str,
        name: &str,
        size: u64,
        mime_type: Option<&str>,
        owner: &str,
    ) -> Result<Node> {
        validate_name(name)?;

        let target = path::normalize(target_path);
        let full_path = path::join(&target, name);
        let is_public = path::is_under(&self.public_root, &full_path);
        let mime = mime_type
            .map(str::to_string)
            .or_else(|| mime_guess::from_path(name).first_raw().map(str::to_string))
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let children = self
            .entries
            .get_mut(&target)
            .ok_or_else(|| MockDriveError::NotFound(format!("target directory {target}")))?;

        // An existing file with the same name is silently replaced.
        children.retain(|n| !(n.name == name && !n.is_directory));

        let node = Node::file(name, &full_path, size, mime, owner).with_public(is_public);
        children.push(node.clone());
        Ok(node)
    }

    /// Delete a node: remove it from its parent's list and, for
    /// directories, drop every descendant entry.
    ///
    /// Fails with NotFound only if the path is absent both from its
    /// parent's listing and from the key space.
    pub fn delete(&mut self, node_path: &str) -> Result<()> {
        let node_path = path::normalize(node_path);
        if node_path == ROOT_PATH {
            return Err(MockDriveError::Validation(
                "cannot delete the root directory".to_string(),
            ));
        }

        let parent = path::parent(&node_path);
        let in_parent = self
            .entries
            .get(&parent)
            .is_some_and(|children| children.iter().any(|n| n.path == node_path));

        if !in_parent && !self.entries.contains_key(&node_path) {
            return Err(MockDriveError::NotFound(format!("node {node_path}")));
        }

        if let Some(children) = self.entries.get_mut(&parent) {
            children.retain(|n| n.path != node_path);
        }
        self.remove_subtree(&node_path);
        Ok(())
    }

    /// Rename a node in place, keeping it under the same parent.
    ///
    /// Fails with NotFound if the node is not in its parent's listing and
    /// Conflict if `new_name` collides with any sibling. Directory renames
    /// move the whole subtree to the new key space, rewriting each
    /// descendant's path level by level.
    pub fn rename(&mut self, old_path: &str, new_name: &str) -> Result<Node> {
        validate_name(new_name)?;

        let old_path = path::normalize(old_path);
        let parent = path::parent(&old_path);
        let new_path = path::join(&parent, new_name);

        let children = self
            .entries
            .get_mut(&parent)
            .ok_or_else(|| MockDriveError::NotFound(format!("node {old_path}")))?;

        if children
            .iter()
            .any(|n| n.name == new_name && n.path != old_path)
        {
            return Err(MockDriveError::Conflict(format!(
                "an item named \"{new_name}\" already exists in {parent}"
            )));
        }

        let node = children
            .iter_mut()
            .find(|n| n.path == old_path)
            .ok_or_else(|| MockDriveError::NotFound(format!("node {old_path}")))?;

        node.name = new_name.to_string();
        node.path = new_path.clone();
        node.touch();
        let renamed = node.clone();

        if renamed.is_directory {
            self.move_subtree(&old_path, &new_path);
        }

        Ok(renamed)
    }

    /// Move a directory's subtree from `old_key` to `new_key`, rewriting
    /// every descendant's path by joining the new parent with the child's
    /// name at each level. Walking the tree this way keeps sibling names
    /// sharing a prefix ("/Doc" vs "/Docs") out of each other's subtrees.
    fn move_subtree(&mut self, old_key: &str, new_key: &str) {
        let Some(children) = self.entries.remove(old_key) else {
            return;
        };

        let mut moved = Vec::with_capacity(children.len());
        for mut child in children {
            let old_child_key = child.path.clone();
            let new_child_key = path::join(new_key, &child.name);
            child.path = new_child_key.clone();
            if child.is_directory {
                self.move_subtree(&old_child_key, &new_child_key);
            }
            moved.push(child);
        }
        self.entries.insert(new_key.to_string(), moved);
    }

    /// Drop `key` and every directory entry beneath it.
    fn remove_subtree(&mut self, key: &str) {
        if let Some(children) = self.entries.remove(key) {
            for child in children {
                if child.is_directory {
                    self.remove_subtree(&child.path);
                }
            }
        }
    }
}

/// Validate an entry name: non-empty, no slash, bounded length.
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MockDriveError::Validation("name is empty".to_string()));
    }
    if name.contains('/') {
        return Err(MockDriveError::Validation(format!(
            "name \"{name}\" must not contain '/'"
        )));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(MockDriveError::Validation(format!(
            "name exceeds {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}
