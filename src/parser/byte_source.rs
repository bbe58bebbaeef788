//! Forward-only byte sources feeding the [ByteParser](crate::parser::ByteParser).
//!
//! Header files and bitstreams are both read exactly once from front to back,
//! so a source only has to hand out the next byte and a little lookahead for
//! error messages.

use std::io;

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Forward-only supply of input bytes.
///
/// Implemented by [InMemoryByteSource](crate::parser::InMemoryByteSource) for
/// inputs held in memory and by
/// [BufferedByteSource](crate::parser::BufferedByteSource) for anything that
/// implements [Read](std::io::Read).
///
/// # Read errors
/// A source that can fail to read reports the failure as end of data and
/// keeps the [io::Error]. Whoever sees `None` must call
/// [take_error](Self::take_error) to tell a clean end of input from a
/// truncated one. Once failed, a source stays at end of data.
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - End of data, or a read error (see [take_error](Self::take_error))
    fn peek(&mut self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns up to `k` upcoming bytes for error context, possibly fewer.
    fn get_context(&mut self, k: usize) -> Vec<u8>;

    /// Returns the number of consumed bytes.
    fn position(&self) -> usize;

    /// Returns `true` once no more bytes can be read.
    fn is_eof(&mut self) -> bool;

    /// Takes the read error that ended the input, if there was one.
    ///
    /// Sources that cannot fail keep the default, which always returns `None`.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}
