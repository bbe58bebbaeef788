//! Owning decoder: builds its own [PrefixTree] and decodes against it.

use crate::decoder::stream_decoder::StreamDecoder;
use crate::error::HuffError;
use crate::header::HeaderEntry;
use crate::model::{PrefixTree, PrefixTreeBuilder};
use crate::parser::{ByteParser, ByteSource};
use std::io::Write;

// =#========================================================================#=
// HUFFMAN DECODER
// =#========================================================================$=
/// A decoder owning the [PrefixTree] it decodes with.
///
/// The tree is replaced as a whole by
/// [build_from_header](Self::build_from_header) and never mutated otherwise,
/// so any number of [stream](Self::stream)s may read it at the same time.
///
/// # Example
/// ```
/// use huffdec::decoder::HuffmanDecoder;
/// use huffdec::header::HeaderEntry;
/// use huffdec::parser::ByteParser;
///
/// let header = vec![
///     HeaderEntry::new("the", "0"),
///     HeaderEntry::new("cat", "10"),
///     HeaderEntry::new("sat", "11"),
/// ];
/// let mut decoder = HuffmanDecoder::new();
/// decoder.build_from_header(&header)?;
///
/// let mut out = Vec::new();
/// decoder.decode(ByteParser::for_str("01011"), &mut out)?;
/// assert_eq!(out, b"the\ncat\nsat\n");
/// # Ok::<(), huffdec::HuffError>(())
/// ```
#[derive(Debug, Default)]
pub struct HuffmanDecoder {
    tree: PrefixTree,
}

impl HuffmanDecoder {
    /// Creates a decoder with the empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder around an already built tree.
    pub fn with_tree(tree: PrefixTree) -> Self {
        Self { tree }
    }

    /// Discards the current tree and builds a new one from `entries`.
    ///
    /// On failure the decoder is left with the empty tree, never with a
    /// partially built one.
    ///
    /// # Errors
    /// See [PrefixTreeBuilder::add_entry].
    pub fn build_from_header(&mut self, entries: &[HeaderEntry]) -> Result<(), HuffError> {
        self.tree = PrefixTree::new();

        let mut builder = PrefixTreeBuilder::new();
        for entry in entries {
            builder.add_entry(entry.token(), entry.code())?;
        }
        self.tree = builder.finish();
        Ok(())
    }

    /// Returns the current tree.
    pub fn tree(&self) -> &PrefixTree {
        &self.tree
    }

    /// Returns a lazy [StreamDecoder] reading bits from `byte_parser`.
    pub fn stream<S: ByteSource>(&self, byte_parser: ByteParser<S>) -> StreamDecoder<'_, S> {
        StreamDecoder::new(&self.tree, byte_parser)
    }

    /// Decodes the whole bitstream, writing one token per line to `out`.
    ///
    /// # Returns
    /// The number of decoded tokens.
    pub fn decode<S: ByteSource, W: Write>(
        &self,
        byte_parser: ByteParser<S>,
        out: W,
    ) -> Result<usize, HuffError> {
        self.stream(byte_parser).decode_into(out)
    }
}
