//! Construction of [PrefixTree]s from `(token, code)` pairs.
//!
//! The [PrefixTreeBuilder] inserts one code at a time as a root-to-leaf path
//! and rejects any table that is not a well-formed prefix code. The quick
//! function [build] runs a builder over a whole sequence of pairs.
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ add_entry() ... ──→ finish() ──→ Empty
//!   ↑                                          │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! A failed `add_entry` leaves the builder holding a partial tree; call
//! [reset](PrefixTreeBuilder::reset) (or drop it) before reusing it.
//!
//! # Single-leaf tables
//! A table consisting of exactly one entry with code `0` collapses into a
//! tree whose root *is* that leaf. Decoding then treats every `0` in the
//! bitstream as one complete code.

use crate::error::{HuffError, HuffErrorKind};
use crate::model::node::{Bit, NodeIndex};
use crate::model::prefix_tree::PrefixTree;
use tracing::debug;

/// Code of the only entry of a table that collapses into a single-leaf tree.
const SINGLE_LEAF_CODE: &str = "0";

// =#========================================================================#=
// PREFIX TREE BUILDER
// =#========================================================================#=
/// Builder that constructs [PrefixTree] instances entry by entry.
///
/// # Example
/// ```
/// use huffdec::model::PrefixTreeBuilder;
///
/// let mut builder = PrefixTreeBuilder::new();
/// builder.add_entry("heron", "0")?;
/// builder.add_entry("egret", "10")?;
/// builder.add_entry("stork", "11")?;
/// let tree = builder.finish();
/// assert_eq!(tree.num_leaves(), 3);
/// # Ok::<(), huffdec::HuffError>(())
/// ```
#[derive(Debug, Default)]
pub struct PrefixTreeBuilder {
    current_tree: PrefixTree,
    num_entries: usize,
    /// First entry, kept to collapse single-entry tables
    first_entry: Option<(String, String)>,
}

impl PrefixTreeBuilder {
    /// Creates a new builder in the empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries added since the last reset.
    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    /// Discards everything built so far.
    pub fn reset(&mut self) {
        self.current_tree.clear();
        self.num_entries = 0;
        self.first_entry = None;
    }

    /// Inserts the path for `code` and places a leaf carrying `token` at its end.
    ///
    /// # Errors
    /// * [HuffErrorKind::MalformedEntry] - `token` or `code` is empty
    /// * [HuffErrorKind::InvalidCodeBit] - `code` contains a character other than `0`/`1`
    /// * [HuffErrorKind::PrefixConflict] - `code` equals an earlier code, is a
    ///   prefix of one, or has an earlier code as prefix
    pub fn add_entry(&mut self, token: &str, code: &str) -> Result<NodeIndex, HuffError> {
        let index = self.num_entries;
        if token.is_empty() || code.is_empty() {
            return Err(HuffError::for_entry(
                HuffErrorKind::MalformedEntry,
                index,
                token,
                code,
            ));
        }

        let bits = code
            .chars()
            .map(Bit::try_from)
            .collect::<Result<Vec<Bit>, char>>()
            .map_err(|c| HuffError::for_entry(HuffErrorKind::InvalidCodeBit(c), index, token, code))?;

        let conflict = |msg: &str| {
            HuffError::for_entry(
                HuffErrorKind::PrefixConflict(msg.to_string()),
                index,
                token,
                code,
            )
        };

        let Some((last, path)) = bits.split_last() else {
            return Err(HuffError::for_entry(
                HuffErrorKind::MalformedEntry,
                index,
                token,
                code,
            ));
        };
        let mut current = self.current_tree.root_or_insert();
        for &bit in path {
            current = self.current_tree.child_or_insert(current, bit);
            if self.current_tree[current].is_leaf() {
                return Err(conflict("an existing code is a prefix of this code"));
            }
        }

        let leaf = self
            .current_tree
            .insert_leaf(current, *last, token.to_string())
            .ok_or_else(|| conflict("code is a duplicate or a prefix of an existing code"))?;

        if self.num_entries == 0 {
            self.first_entry = Some((token.to_string(), code.to_string()));
        }
        self.num_entries += 1;
        Ok(leaf)
    }

    /// Finalizes and returns the tree, leaving the builder empty.
    pub fn finish(&mut self) -> PrefixTree {
        let num_entries = self.num_entries;
        let first_entry = self.first_entry.take();
        let tree = std::mem::take(&mut self.current_tree);
        self.reset();

        let tree = match first_entry {
            Some((token, code)) if num_entries == 1 && code == SINGLE_LEAF_CODE => {
                PrefixTree::single_leaf(token)
            }
            _ => tree,
        };

        debug!(
            leaves = tree.num_leaves(),
            nodes = tree.num_nodes(),
            single_leaf = tree.is_single_leaf(),
            "built prefix tree"
        );
        tree
    }
}

// =#========================================================================#=
// QUICK BUILD API
// =#========================================================================#=
/// Builds a [PrefixTree] from an ordered sequence of `(token, code)` pairs.
///
/// An empty sequence yields the empty tree, which is valid.
///
/// # Errors
/// Fails on the first rejected pair, see [PrefixTreeBuilder::add_entry].
///
/// # Example
/// ```
/// use huffdec::model::tree_builder::build;
///
/// let tree = build([("a", "0"), ("b", "10"), ("c", "11")])?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// let err = build([("a", "0"), ("b", "01")]).unwrap_err();
/// assert!(err.is_build_error());
/// # Ok::<(), huffdec::HuffError>(())
/// ```
pub fn build<I, T, C>(pairs: I) -> Result<PrefixTree, HuffError>
where
    I: IntoIterator<Item = (T, C)>,
    T: AsRef<str>,
    C: AsRef<str>,
{
    let mut builder = PrefixTreeBuilder::new();
    for (token, code) in pairs {
        builder.add_entry(token.as_ref(), code.as_ref())?;
    }
    Ok(builder.finish())
}

// =#========================================================================#=
// TESTS
// =#========================================================================#=
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_reuse_after_finish() {
        let mut builder = PrefixTreeBuilder::new();
        builder.add_entry("a", "0").unwrap();
        builder.add_entry("b", "1").unwrap();
        let first = builder.finish();
        assert_eq!(builder.num_entries(), 0);

        builder.add_entry("c", "1").unwrap();
        builder.add_entry("d", "0").unwrap();
        let second = builder.finish();

        assert_eq!(first.num_leaves(), 2);
        assert_eq!(second.num_leaves(), 2);
        assert_eq!(second.code_table()[0].0, "d");
    }

    #[test]
    fn test_reset_after_error() {
        let mut builder = PrefixTreeBuilder::new();
        builder.add_entry("a", "0").unwrap();
        assert!(builder.add_entry("b", "0").is_err());
        builder.reset();
        builder.add_entry("b", "0").unwrap();
        builder.add_entry("a", "1").unwrap();
        let tree = builder.finish();
        assert!(tree.is_valid());
        assert_eq!(tree.code_table()[0].0, "b");
    }

    #[test]
    fn test_error_position_is_entry_index() {
        let err = build([("a", "0"), ("b", "10"), ("c", "1x")]).unwrap_err();
        assert_eq!(err.kind(), &HuffErrorKind::InvalidCodeBit('x'));
        assert_eq!(err.position(), Some(2));
    }

    #[test]
    fn test_single_entry_other_than_zero_is_regular_path() {
        let tree = build([("only", "1")]).unwrap();
        assert!(!tree.is_single_leaf());
        assert_eq!(tree.num_nodes(), 2);
        assert!(tree.is_valid());
    }
}
