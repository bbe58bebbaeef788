//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] for reading line-oriented header files
//! and bitstreams with support for peeking, consuming, line handling and
//! context extraction for error reporting.

use crate::error::HuffError;
use crate::parser::byte_source::ByteSource;
use crate::parser::in_memory_byte_source::InMemoryByteSource;
use std::io;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking and consuming.
///
/// [ByteParser] operates on any [ByteSource] and assumes ASCII framing
/// (line breaks, spaces, bits). Token bytes are passed through untouched.
///
/// # Example
/// ```
/// use huffdec::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("\n\r\nbanana 101\r\nkiwi 0");
/// parser.skip_line_breaks();
/// assert_eq!(parser.consume_line(), b"banana 101");
/// assert_eq!(parser.peek(), Some(b'k'));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a byte slice by copying it into a Vec.
    ///
    /// # Arguments
    /// * `input` - The byte slice to parse
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    ///
    /// # Arguments
    /// * `input` - The string to parse
    pub fn for_str(input: &str) -> Self {
        Self::for_bytes(input.as_bytes())
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    ///
    /// # Arguments
    /// * `source` - The byte source to parse
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&mut self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive line breaks (`'\n'` and `'\r'`).
    pub fn skip_line_breaks(&mut self) {
        while let Some(b) = self.peek() {
            if is_line_break(b) {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Consumes the rest of the current line and returns it.
    ///
    /// The terminating `'\n'` is consumed but not returned, and a single
    /// trailing `'\r'` is stripped. At EOF an empty vector is returned.
    pub fn consume_line(&mut self) -> Vec<u8> {
        let mut line = Vec::new();
        while let Some(b) = self.next_byte() {
            if b == b'\n' {
                break;
            }
            line.push(b);
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        line
    }

    /// Returns the first byte that is not a line break without consuming
    /// anything but line breaks, or `None` if only line breaks remain.
    pub fn first_significant_byte(&mut self) -> Option<u8> {
        self.skip_line_breaks();
        self.peek()
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&mut self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position in the input.
    ///
    /// # Returns
    /// The current byte offset in the input
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Takes the read error that ended the input early, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.source.take_error()
    }

    /// Fails with [HuffErrorKind::Io](crate::HuffErrorKind::Io) if the input
    /// ended because of a read error rather than at its real end.
    pub fn check_read_error(&mut self) -> Result<(), HuffError> {
        match self.take_error() {
            Some(err) => Err(HuffError::read_failure(err, self.position())),
            None => Ok(()),
        }
    }

    /// Returns up to `k` bytes from the current position for error context.
    pub fn get_context(&mut self, k: usize) -> Vec<u8> {
        self.source.get_context(k)
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&mut self, k: usize) -> String {
        let context_bytes = self.get_context(k);
        String::from_utf8_lossy(&context_bytes).into_owned()
    }
}

/// Returns whether `b` is a line break, i.e. a formatting byte in bitstreams.
#[inline(always)]
pub fn is_line_break(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}
