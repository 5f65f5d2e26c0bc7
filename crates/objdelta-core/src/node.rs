//! Diff result tree
//!
//! A comparison produces a tree of [`DiffNode`]s, built bottom-up in a single
//! pass and immutable once returned. Nodes do not hold references into the
//! compared value graphs; visitors re-resolve working/base values transiently
//! (see `visit`), so the result tree never pins large object graphs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::path::NodePath;

/// Terminal classification of a node, assigned exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeState {
    /// Both values present and equal (children may still carry changes)
    Untouched,
    /// Base value absent, working value present
    Added,
    /// Working value absent, base value present
    Removed,
    /// Both present and not equal
    Changed,
    /// A value's identity already appears on the active recursion path
    Circular,
    /// Hidden by the inspection policy or member metadata
    Ignored,
    /// The introspector could not enumerate the value's members
    Inaccessible,
}

impl NodeState {
    /// True for states that count as an actual difference.
    pub fn is_change(&self) -> bool {
        matches!(self, NodeState::Added | NodeState::Removed | NodeState::Changed)
    }
}

/// A single node in the diff result tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffNode {
    /// Address of this node from the comparison root
    pub path: NodePath,
    /// Runtime type name of the compared value (non-absent side)
    pub value_type: String,
    /// Terminal state classification
    pub state: NodeState,
    /// Free-form category tags attached by member metadata
    pub categories: BTreeSet<String>,
    /// True if this subtree was short-circuited to an equality test
    pub equals_only: bool,
    /// Child nodes; their paths are proper extensions of this node's path
    pub children: Vec<DiffNode>,
}

impl DiffNode {
    /// Create a childless node.
    pub fn new(path: NodePath, value_type: impl Into<String>, state: NodeState) -> Self {
        Self {
            path,
            value_type: value_type.into(),
            state,
            categories: BTreeSet::new(),
            equals_only: false,
            children: Vec::new(),
        }
    }

    /// True if this node sits at the comparison root.
    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }

    /// True if this node has child nodes.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True if this node or any descendant carries an actual difference.
    pub fn has_changes(&self) -> bool {
        self.state.is_change() || self.children.iter().any(DiffNode::has_changes)
    }

    /// Total number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DiffNode::node_count).sum::<usize>()
    }

    /// Find the descendant (or self) at exactly the given path.
    pub fn node_at(&self, path: &NodePath) -> Option<&DiffNode> {
        if &self.path == path {
            return Some(self);
        }
        if !path.starts_with(&self.path) {
            return None;
        }
        self.children.iter().find_map(|child| child.node_at(path))
    }

    /// Collect all nodes in this subtree with the given state, pre-order.
    pub fn nodes_with_state(&self, state: NodeState) -> Vec<&DiffNode> {
        let mut found = Vec::new();
        self.collect_with_state(state, &mut found);
        found
    }

    fn collect_with_state<'a>(&'a self, state: NodeState, found: &mut Vec<&'a DiffNode>) {
        if self.state == state {
            found.push(self);
        }
        for child in &self.children {
            child.collect_with_state(state, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: NodePath, state: NodeState) -> DiffNode {
        DiffNode::new(path, "text", state)
    }

    #[test]
    fn test_state_change_classification() {
        assert!(NodeState::Added.is_change());
        assert!(NodeState::Removed.is_change());
        assert!(NodeState::Changed.is_change());
        assert!(!NodeState::Untouched.is_change());
        assert!(!NodeState::Circular.is_change());
        assert!(!NodeState::Ignored.is_change());
        assert!(!NodeState::Inaccessible.is_change());
    }

    #[test]
    fn test_has_changes_rolls_up_from_descendants() {
        let root_path = NodePath::root();
        let mut root = DiffNode::new(root_path.clone(), "Person", NodeState::Untouched);
        assert!(!root.has_changes());

        root.children
            .push(leaf(root_path.field("name"), NodeState::Changed));
        assert!(root.has_changes());
    }

    #[test]
    fn test_node_at_walks_the_tree() {
        let root_path = NodePath::root();
        let name_path = root_path.field("name");
        let mut root = DiffNode::new(root_path.clone(), "Person", NodeState::Untouched);
        root.children.push(leaf(name_path.clone(), NodeState::Changed));

        assert!(root.node_at(&name_path).is_some());
        assert!(root.node_at(&root_path.field("missing")).is_none());
        assert_eq!(root.node_at(&root_path).unwrap().state, NodeState::Untouched);
    }

    #[test]
    fn test_node_count() {
        let root_path = NodePath::root();
        let mut root = DiffNode::new(root_path.clone(), "Person", NodeState::Untouched);
        root.children
            .push(leaf(root_path.field("a"), NodeState::Added));
        root.children
            .push(leaf(root_path.field("b"), NodeState::Removed));
        assert_eq!(root.node_count(), 3);
    }
}
