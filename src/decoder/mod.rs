//! Decoding bitstreams against a [PrefixTree].
//!
//! This module provides the lazy [StreamDecoder], the owning
//! [HuffmanDecoder], and the quick function [decode].
//!
//! # Decoding rules
//! * Empty tree: any input is accepted and no token is emitted. The input is
//!   not even read, so malformed input is not detected either.
//! * Single-leaf tree: every `0` emits the only token, a `1` is an error.
//! * General tree: bits walk from the root, `0` to the left child and `1` to
//!   the right child. A leaf emits its token and resets the walk to the root.
//!   The input must end on the root.
//! * Line breaks (`'\n'`, `'\r'`) are ignored everywhere, any other byte
//!   except `0`/`1` is an error.

mod huffman_decoder;
mod stream_decoder;

pub use self::huffman_decoder::HuffmanDecoder;
pub use self::stream_decoder::{DEFAULT_SEPARATOR, StreamDecoder};

use crate::error::HuffError;
use crate::model::PrefixTree;
use crate::parser::{ByteParser, ByteSource};
use std::io::Write;

/// Decodes the whole bitstream read by `byte_parser` against `tree`,
/// writing each token followed by a line break to `out`.
///
/// # Returns
/// The number of decoded tokens.
///
/// # Errors
/// See [StreamDecoder::next_token] and [StreamDecoder::decode_into].
///
/// # Example
/// ```
/// use huffdec::decoder::decode;
/// use huffdec::model::tree_builder::build;
/// use huffdec::parser::ByteParser;
///
/// let tree = build([("only", "0")])?;
/// let mut out = Vec::new();
/// let count = decode(&tree, ByteParser::for_str("0\n0\n0"), &mut out)?;
/// assert_eq!(count, 3);
/// assert_eq!(out, b"only\nonly\nonly\n");
/// # Ok::<(), huffdec::HuffError>(())
/// ```
pub fn decode<S: ByteSource, W: Write>(
    tree: &PrefixTree,
    byte_parser: ByteParser<S>,
    out: W,
) -> Result<usize, HuffError> {
    StreamDecoder::new(tree, byte_parser).decode_into(out)
}
