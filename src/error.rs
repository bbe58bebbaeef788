//! Error types for building code tables and decoding bitstreams.
//!
//! This module provides [HuffError] and [HuffErrorKind] for representing
//! and reporting every way a header or a bitstream can be rejected.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use thiserror::Error;

/// Default length of context provided by errors raised while reading input
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// ERROR KIND
// =#========================================================================#=
/// Kinds of errors that can occur while building a tree or decoding.
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum HuffErrorKind {
    // --- Build time ---
    /// Header entry with empty token or empty code
    #[error("Header has empty token or code")]
    MalformedEntry,
    /// Code contains a character other than `0` and `1`
    #[error("Header contains a non-binary code bit {0:?}")]
    InvalidCodeBit(char),
    /// Duplicate code, or one code is a prefix of another
    #[error("Header has duplicate code or prefix conflict - {0}")]
    PrefixConflict(String),

    // --- Decode time ---
    /// Bit source contains a byte that is neither a bit nor a line break
    #[error("Code contains a non-binary character {}", describe_byte(.0))]
    InvalidBitCharacter(u8),
    /// Bit path leads to a child that does not exist in the tree
    #[error("Bitstream leads to a non-existent branch (invalid code path)")]
    InvalidBranch,
    /// A `1` was read while the tree consists of a single leaf
    #[error("Invalid bit for single-symbol code (expected only '0')")]
    InvalidBitForSingleSymbol,
    /// Bit source ended while the cursor was inside the tree
    #[error("Bitstream ended before reaching a leaf (truncated code)")]
    TruncatedStream,
    /// Writing a decoded token to the sink failed
    #[error("Failed writing decoded token - {0}")]
    OutputWriteFailure(String),

    // --- Collaborators ---
    /// Header line violates the `token code` line format
    #[error("Malformed header - {0}")]
    MalformedHeader(String),
    /// Code file does not begin with `0` or `1`
    #[error("Code file must start with 0 or 1")]
    InvalidCodeFileStart,
    /// Reading input failed
    #[error("IO error - {0}")]
    Io(String),
}

// =#========================================================================#=
// HUFF ERROR
// =#========================================================================#=
/// Error with contextual information (position and surrounding bytes or entry).
///
/// For build errors, the position is the zero-based index of the offending
/// header entry and the context is that entry. For errors raised while reading
/// a byte source, the position is the byte offset and the context holds the
/// upcoming bytes.
#[derive(Error, Debug)]
#[error("{kind}{}", describe_location(.position, .context))]
pub struct HuffError {
    kind: HuffErrorKind,
    position: Option<usize>,
    context: String,
}

/// Quotes printable ASCII, shows everything else as hex.
fn describe_byte(byte: &u8) -> String {
    if byte.is_ascii_graphic() || *byte == b' ' {
        format!("'{}'", char::from(*byte))
    } else {
        format!("0x{byte:02X}")
    }
}

fn describe_location(position: &Option<usize>, context: &str) -> String {
    let mut out = String::new();
    if let Some(pos) = position {
        out.push_str(&format!(" at position {pos}"));
    }
    if !context.is_empty() {
        out.push_str(&format!("\n  Context: {context}"));
    }
    out
}

impl HuffError {
    /// Create a HuffError with explicit position and context
    pub fn new(kind: HuffErrorKind, position: Option<usize>, context: String) -> Self {
        Self {
            kind,
            position,
            context,
        }
    }

    /// Create a HuffError from an error kind and parser state
    pub fn from_parser<S: ByteSource>(kind: HuffErrorKind, parser: &mut ByteParser<S>) -> Self {
        Self {
            kind,
            position: Some(parser.position()),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Create a HuffError for a header entry, identified by its index
    pub fn for_entry(kind: HuffErrorKind, index: usize, token: &str, code: &str) -> Self {
        Self {
            kind,
            position: Some(index),
            context: format!("{token} {code}"),
        }
    }

    /// Create a HuffError without position or context
    pub fn without_context(kind: HuffErrorKind) -> Self {
        Self {
            kind,
            position: None,
            context: String::new(),
        }
    }

    /// Convenience constructor for OutputWriteFailure
    pub fn output_write_failure(err: std::io::Error) -> Self {
        Self::without_context(HuffErrorKind::OutputWriteFailure(err.to_string()))
    }

    /// Create an Io error for a read failure at byte offset `position`
    pub fn read_failure(err: std::io::Error, position: usize) -> Self {
        Self::new(HuffErrorKind::Io(err.to_string()), Some(position), String::new())
    }

    /// Get the error kind
    pub fn kind(&self) -> &HuffErrorKind {
        &self.kind
    }

    /// Get the position where the error occurred, if known
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Returns whether this error was raised while building a tree
    pub fn is_build_error(&self) -> bool {
        matches!(
            self.kind,
            HuffErrorKind::MalformedEntry
                | HuffErrorKind::InvalidCodeBit(_)
                | HuffErrorKind::PrefixConflict(_)
        )
    }
}

impl From<std::io::Error> for HuffError {
    fn from(err: std::io::Error) -> Self {
        Self::without_context(HuffErrorKind::Io(err.to_string()))
    }
}
