//! Provides the prefix tree used as decode table.
//!
//! * [PrefixTree] - Binary tree using the arena pattern, where each leaf holds
//!   a token and the path from the root to the leaf spells out its code
//!   (`0` = left, `1` = right).

use crate::model::node::{Bit, Node, NodeIndex};
use std::ops::Index;

// =$========================================================================$=
// PREFIX TREE
// =$========================================================================$=
/// A binary prefix tree represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex].
/// This avoids ownership troubles and makes teardown a flat drop, no matter
/// how deep and unbalanced the code table is.
///
/// # Structure
/// - No root (`root_index() == None`) represents the empty table.
/// - A root that is itself a [Node::Leaf] represents the single-leaf table.
/// - Otherwise the root is internal and every code is a root-to-leaf path.
///
/// # Immutability
/// Trees are only constructed through the
/// [tree_builder](crate::model::tree_builder) module. The public API is
/// read-only, so a built tree can be shared across threads and decoded
/// concurrently without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root, `None` for the empty table
    root_index: Option<NodeIndex>,

    /// Number of leaves, i.e. number of codes
    num_leaves: usize,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl PrefixTree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this tree holds no codes at all.
    pub fn is_empty(&self) -> bool {
        self.root_index.is_none()
    }

    /// Returns `true` if the root itself is the one and only leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.root().is_some_and(Node::is_leaf)
    }

    /// Returns the index of the root, or `None` for the empty tree.
    pub fn root_index(&self) -> Option<NodeIndex> {
        self.root_index
    }

    /// Returns a reference to the root node, or `None` for the empty tree.
    pub fn root(&self) -> Option<&Node> {
        self.root_index.map(|index| &self[index])
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self[index]
    }

    /// Returns the child of `index` selected by `bit`, if present.
    #[inline(always)]
    pub fn child(&self, index: NodeIndex, bit: Bit) -> Option<NodeIndex> {
        self.nodes[index].child(bit)
    }

    /// Returns the number of leaves (codes) in this tree.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the number of internal nodes in this tree.
    pub fn num_internal(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_internal()).count()
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the length of the longest code, `0` for the empty tree.
    ///
    /// The single-leaf tree has depth `1`, as its only code is `0`.
    pub fn depth(&self) -> usize {
        self.code_table()
            .iter()
            .map(|(_, code)| code.len())
            .max()
            .unwrap_or(0)
    }

    /// Returns all `(token, code)` pairs, ordered by code (left before right).
    ///
    /// For a single-leaf tree the code of its only token is `"0"`.
    pub fn code_table(&self) -> Vec<(String, String)> {
        let Some(root) = self.root_index else {
            return Vec::new();
        };

        let mut table = Vec::with_capacity(self.num_leaves);
        if let Some(token) = self[root].token() {
            table.push((token.to_string(), Bit::Zero.as_char().to_string()));
            return table;
        }

        // Depth-first, pushing right before left so that `0` paths come first
        let mut stack: Vec<(NodeIndex, String)> = vec![(root, String::new())];
        while let Some((index, code)) = stack.pop() {
            match &self[index] {
                Node::Leaf { token } => table.push((token.clone(), code)),
                Node::Internal { left, right } => {
                    if let Some(r) = right {
                        stack.push((*r, format!("{code}1")));
                    }
                    if let Some(l) = left {
                        stack.push((*l, format!("{code}0")));
                    }
                }
            }
        }

        table
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Empty trees have no nodes
    /// - All child indices are in bounds and every node except the root
    ///   is referenced exactly once
    /// - Every internal node has at least one child
    /// - Every leaf has a non-empty token, and the leaf count matches
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root_index else {
            return self.nodes.is_empty() && self.num_leaves == 0;
        };
        if root >= self.nodes.len() {
            return false;
        }

        let mut references = vec![0usize; self.nodes.len()];
        let mut leaf_count = 0;
        for node in &self.nodes {
            match node {
                Node::Leaf { token } => {
                    if token.is_empty() {
                        return false;
                    }
                    leaf_count += 1;
                }
                Node::Internal { left, right } => {
                    if left.is_none() && right.is_none() {
                        return false;
                    }
                    for child in [left, right].into_iter().flatten() {
                        if *child >= self.nodes.len() {
                            return false;
                        }
                        references[*child] += 1;
                    }
                }
            }
        }

        references
            .iter()
            .enumerate()
            .all(|(index, &count)| if index == root { count == 0 } else { count == 1 })
            && leaf_count == self.num_leaves
    }
}

// ============================================================================
// Construction (crate only, used by tree builder)
// ============================================================================
impl PrefixTree {
    /// Discards all nodes, returning to the empty tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root_index = None;
        self.num_leaves = 0;
    }

    /// Creates a tree whose root is the only leaf.
    pub(crate) fn single_leaf(token: String) -> Self {
        Self {
            nodes: vec![Node::new_leaf(token)],
            root_index: Some(0),
            num_leaves: 1,
        }
    }

    /// Returns the root index, creating an internal root first if needed.
    pub(crate) fn root_or_insert(&mut self) -> NodeIndex {
        match self.root_index {
            Some(root) => root,
            None => {
                let root = self.push(Node::new_internal());
                self.root_index = Some(root);
                root
            }
        }
    }

    /// Returns the child of `parent` selected by `bit`, creating an internal
    /// node there first if needed.
    ///
    /// The returned node may be a leaf; callers decide whether descending
    /// further is allowed.
    pub(crate) fn child_or_insert(&mut self, parent: NodeIndex, bit: Bit) -> NodeIndex {
        if let Some(child) = self.nodes[parent].child(bit) {
            return child;
        }
        let child = self.push(Node::new_internal());
        self.nodes[parent].set_child(bit, child);
        child
    }

    /// Attaches a new leaf carrying `token` as child of `parent` at `bit`.
    ///
    /// # Returns
    /// The index of the new leaf, or `None` if that child already exists.
    pub(crate) fn insert_leaf(
        &mut self,
        parent: NodeIndex,
        bit: Bit,
        token: String,
    ) -> Option<NodeIndex> {
        if self.nodes[parent].child(bit).is_some() {
            return None;
        }
        let leaf = self.push(Node::new_leaf(token));
        self.nodes[parent].set_child(bit, leaf);
        self.num_leaves += 1;
        Some(leaf)
    }

    fn push(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }
}

impl Index<NodeIndex> for PrefixTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}
