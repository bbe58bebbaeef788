//! Data model for binary prefix trees.
//!
//! # Tree representation
//! Code tables are represented by [PrefixTree], which uses the arena pattern
//! to store [Node]s. Each node is either a `Leaf` carrying a token or an
//! `Internal` node with up to two children, referenced by [NodeIndex].
//! The path from the root to a leaf spells out the leaf's code, where [Bit]
//! `Zero` selects the left and `One` the right child.
//!
//! Three shapes are possible:
//!
//! | Shape | Root | Decoding |
//! |-------|------|----------|
//! | Empty | none | accepts any input, emits nothing |
//! | Single leaf | the leaf itself | every `0` emits the token |
//! | General | internal node | walk bits from the root, emit at leaves |
//!
//! # Building trees
//! Trees are constructed from `(token, code)` pairs via the
//! [PrefixTreeBuilder] (or the quick function [tree_builder::build]), which
//! validates that the pairs form a prefix code. Built trees are immutable.

pub mod node;
pub mod prefix_tree;
pub mod tree_builder;

pub use node::Bit;
pub use node::Node;
pub use node::NodeIndex;
pub use prefix_tree::PrefixTree;
pub use tree_builder::PrefixTreeBuilder;
