//! In-memory archive tree.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Node 0 is
//! the synthetic root (path `.`); the arena order is the scan order. The
//! shape of the tree is fixed once the scanner returns: only payloads change
//! afterwards.

mod node;

pub use node::Entry;
pub use node::EntryMeta;
pub use node::Node;

use std::collections::HashMap;
use std::ops::Index;
use std::ops::IndexMut;

use crate::error::SkipReason;
use crate::types::EntryPath;

/// Stable identifier of a node inside one [`ArchiveTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in scan order (0 is the root).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Hierarchical view of an archive, parametrized by a per-node payload.
#[derive(Debug, Clone)]
pub struct ArchiveTree<T> {
    nodes: Vec<Node<T>>,
    index: HashMap<EntryPath, NodeId>,
}

impl<T> ArchiveTree<T> {
    pub(crate) fn from_root(entry: Entry, payload: T) -> Self {
        let root = Node {
            entry,
            parent: None,
            children: Vec::new(),
            payload,
        };

        let mut index = HashMap::new();
        index.insert(EntryPath::root(), NodeId(0));
        Self {
            nodes: vec![root],
            index,
        }
    }

    /// Attaches `entry` under its parent directory, or under the root when no
    /// directory with the parent path exists.
    pub(crate) fn attach(&mut self, entry: Entry, payload: T) -> Result<NodeId, SkipReason> {
        if self.index.contains_key(&entry.path) {
            return Err(SkipReason::PathExists);
        }

        let parent = self
            .find(&entry.path.parent())
            .filter(|&id| self[id].is_dir())
            .unwrap_or_else(|| self.root());

        let id = NodeId(self.nodes.len());
        self.index.insert(entry.path.clone(), id);
        self.nodes.push(Node {
            entry,
            parent: Some(parent),
            children: Vec::new(),
            payload,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// The synthetic root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node with the given id, if it belongs to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Looks a node up by its normalized path.
    #[must_use]
    pub fn find(&self, path: &EntryPath) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    /// Normalizes `raw` and looks the result up.
    #[must_use]
    pub fn find_str(&self, raw: &str) -> Option<NodeId> {
        self.find(&EntryPath::normalize(raw))
    }

    /// Parent of `id`, or `id` itself for the root.
    #[must_use]
    pub fn parent_or_self(&self, id: NodeId) -> NodeId {
        self[id].parent.unwrap_or(id)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates all nodes in scan order, root first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Iterates all resolved paths in scan order, root first.
    pub fn paths(&self) -> impl Iterator<Item = &EntryPath> {
        self.nodes.iter().map(Node::path)
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            next: self[id].parent,
        }
    }

    /// Strict descendants of `id` in depth-first pre-order, children visited
    /// in insertion order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_, T> {
        let stack = self[id].children.iter().rev().copied().collect();
        Descendants { tree: self, stack }
    }
}

impl<T> Index<NodeId> for ArchiveTree<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl<T> IndexMut<NodeId> for ArchiveTree<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}

/// Iterator over strict ancestors. See [`ArchiveTree::ancestors`].
pub struct Ancestors<'a, T> {
    tree: &'a ArchiveTree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree[current].parent;
        Some(current)
    }
}

/// Pre-order iterator over strict descendants. See
/// [`ArchiveTree::descendants`].
pub struct Descendants<'a, T> {
    tree: &'a ArchiveTree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for Descendants<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree[current].children.iter().rev().copied());
        Some(current)
    }
}
