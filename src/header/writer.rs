//! Writer for the code table of a [PrefixTree] in header format.

use crate::model::PrefixTree;
use std::io::{self, Write};

/// Writes every `(token, code)` pair of `tree` as a header line, ordered by code.
///
/// Parsing the output and building from it yields an equivalent tree.
pub fn write_header<W: Write>(tree: &PrefixTree, mut out: W) -> io::Result<()> {
    for (token, code) in tree.code_table() {
        writeln!(out, "{token} {code}")?;
    }
    out.flush()
}

/// Returns the code table of `tree` in header format.
///
/// # Example
/// ```
/// use huffdec::header::to_header_string;
/// use huffdec::model::tree_builder::build;
///
/// let tree = build([("sat", "11"), ("the", "0"), ("cat", "10")])?;
/// assert_eq!(to_header_string(&tree), "the 0\ncat 10\nsat 11\n");
/// # Ok::<(), huffdec::HuffError>(())
/// ```
pub fn to_header_string(tree: &PrefixTree) -> String {
    tree.code_table()
        .into_iter()
        .map(|(token, code)| format!("{token} {code}\n"))
        .collect()
}
