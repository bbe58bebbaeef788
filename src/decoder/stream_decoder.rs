//! Streaming decoder walking a bitstream through a [PrefixTree].
//!
//! The decoder keeps a single cursor into the tree. Each bit moves the
//! cursor to a child; reaching a leaf emits its token and puts the cursor
//! back on the root. Tokens are handed out one at a time, so arbitrarily
//! long bitstreams decode in constant memory.

use crate::error::{HuffError, HuffErrorKind};
use crate::model::{Bit, NodeIndex, PrefixTree};
use crate::parser::byte_parser::is_line_break;
use crate::parser::{ByteParser, ByteSource};
use std::io::Write;
use tracing::{debug, trace};

/// Record separator written after each token by default.
pub const DEFAULT_SEPARATOR: &[u8] = b"\n";

// =#========================================================================#=
// STREAM DECODER
// =#========================================================================#=
/// Lazy decoder over a bitstream.
///
/// Created with [StreamDecoder::new] (or
/// [HuffmanDecoder::stream](crate::decoder::HuffmanDecoder::stream)).
/// Pull tokens with [next_token](Self::next_token) or via the [Iterator]
/// implementation, or write them all to a sink with
/// [decode_into](Self::decode_into).
///
/// # Input
/// - `'0'` and `'1'` are bits.
/// - `'\n'` and `'\r'` are ignored anywhere (line wrapping).
/// - Any other byte is an error.
///
/// After the first error (or once the input is exhausted) the decoder is
/// finished and yields nothing more.
///
/// # Example
/// ```
/// use huffdec::decoder::StreamDecoder;
/// use huffdec::model::tree_builder::build;
/// use huffdec::parser::ByteParser;
///
/// let tree = build([("a", "0"), ("b", "1")])?;
/// let decoder = StreamDecoder::new(&tree, ByteParser::for_str("0101\n01"));
/// let tokens = decoder.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(tokens, ["a", "b", "a", "b", "a", "b"]);
/// # Ok::<(), huffdec::HuffError>(())
/// ```
pub struct StreamDecoder<'t, S: ByteSource> {
    tree: &'t PrefixTree,
    byte_parser: ByteParser<S>,
    /// Current position in the tree, `None` only for the empty tree
    cursor: Option<NodeIndex>,
    separator: Vec<u8>,
    num_emitted: usize,
    done: bool,
}

impl<'t, S: ByteSource> StreamDecoder<'t, S> {
    /// Creates a decoder reading bits from `byte_parser`, cursor on the root.
    pub fn new(tree: &'t PrefixTree, byte_parser: ByteParser<S>) -> Self {
        Self {
            tree,
            byte_parser,
            cursor: tree.root_index(),
            separator: DEFAULT_SEPARATOR.to_vec(),
            num_emitted: 0,
            done: false,
        }
    }

    /// Sets the record separator written after each token by
    /// [decode_into](Self::decode_into). Defaults to `"\n"`.
    pub fn with_separator<B: AsRef<[u8]>>(mut self, separator: B) -> Self {
        self.separator = separator.as_ref().to_vec();
        self
    }

    /// Returns the number of tokens emitted so far.
    pub fn num_emitted(&self) -> usize {
        self.num_emitted
    }

    /// Returns `true` if the cursor is on the root, i.e. between codes.
    pub fn is_at_root(&self) -> bool {
        self.cursor == self.tree.root_index()
    }

    /// Returns the current byte offset in the bitstream.
    pub fn byte_position(&self) -> usize {
        self.byte_parser.position()
    }

    /// Consumes the decoder and returns the underlying [ByteParser].
    pub fn into_byte_parser(self) -> ByteParser<S> {
        self.byte_parser
    }

    /// Decodes the next token.
    ///
    /// # Returns
    /// * `Ok(Some(token))` - The next decoded token
    /// * `Ok(None)` - The bitstream ended cleanly between codes
    ///
    /// # Errors
    /// * [HuffErrorKind::InvalidBitCharacter] - byte is neither bit nor line break
    /// * [HuffErrorKind::InvalidBitForSingleSymbol] - `1` for a single-leaf tree
    /// * [HuffErrorKind::InvalidBranch] - bit leads to a missing child
    /// * [HuffErrorKind::TruncatedStream] - input ended inside a code
    /// * [HuffErrorKind::Io] - reading the input failed
    pub fn next_token(&mut self) -> Result<Option<&'t str>, HuffError> {
        if self.done {
            return Ok(None);
        }

        let result = self.step();
        match &result {
            Ok(Some(_)) => self.num_emitted += 1,
            Ok(None) | Err(_) => self.done = true,
        }
        result
    }

    /// Decodes all remaining tokens and writes each, followed by the record
    /// separator, to `out`. Flushes `out` at the end.
    ///
    /// Already written tokens stay in `out` when decoding fails.
    ///
    /// # Returns
    /// The number of tokens written by this call.
    ///
    /// # Errors
    /// Any error of [next_token](Self::next_token), or
    /// [HuffErrorKind::OutputWriteFailure] if writing to `out` fails.
    pub fn decode_into<W: Write>(&mut self, mut out: W) -> Result<usize, HuffError> {
        let mut count = 0;
        while let Some(token) = self.next_token()? {
            trace!(token, "emit");
            out.write_all(token.as_bytes())
                .and_then(|_| out.write_all(&self.separator))
                .map_err(|err| {
                    self.done = true;
                    HuffError::output_write_failure(err)
                })?;
            count += 1;
        }
        out.flush().map_err(HuffError::output_write_failure)?;

        debug!(tokens = count, bytes = self.byte_position(), "decoded bitstream");
        Ok(count)
    }

    /// Advances through the input until a token is complete or input ends.
    fn step(&mut self) -> Result<Option<&'t str>, HuffError> {
        let tree = self.tree;
        // Empty table: accept anything, emit nothing
        let Some(root) = tree.root_index() else {
            return Ok(None);
        };
        let single_leaf = tree.is_single_leaf();

        loop {
            let Some(byte) = self.byte_parser.peek() else {
                self.byte_parser.check_read_error()?;
                if !single_leaf && self.cursor != Some(root) {
                    return Err(HuffError::from_parser(
                        HuffErrorKind::TruncatedStream,
                        &mut self.byte_parser,
                    ));
                }
                return Ok(None);
            };

            if is_line_break(byte) {
                self.byte_parser.next_byte();
                continue;
            }

            let Some(bit) = Bit::from_byte(byte) else {
                return Err(HuffError::from_parser(
                    HuffErrorKind::InvalidBitCharacter(byte),
                    &mut self.byte_parser,
                ));
            };

            if single_leaf {
                if bit == Bit::One {
                    return Err(HuffError::from_parser(
                        HuffErrorKind::InvalidBitForSingleSymbol,
                        &mut self.byte_parser,
                    ));
                }
                self.byte_parser.next_byte();
                return Ok(tree[root].token());
            }

            let current = self.cursor.unwrap_or(root);
            let Some(next) = tree.child(current, bit) else {
                return Err(HuffError::from_parser(
                    HuffErrorKind::InvalidBranch,
                    &mut self.byte_parser,
                ));
            };
            self.byte_parser.next_byte();

            if let Some(token) = tree[next].token() {
                self.cursor = Some(root);
                return Ok(Some(token));
            }
            self.cursor = Some(next);
        }
    }
}

impl<'t, S: ByteSource> Iterator for StreamDecoder<'t, S> {
    type Item = Result<&'t str, HuffError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
