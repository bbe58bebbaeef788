//! Byte source over an owned buffer.

use crate::parser::byte_source::ByteSource;
use std::fs;
use std::path::Path;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// Byte source holding the whole input in a `Vec<u8>`.
///
/// Reading happens up front in [from_file](Self::from_file), so the source
/// itself never fails and error context can always look the full distance
/// ahead. Used for header files and for `--in-memory` decoding.
pub struct InMemoryByteSource {
    input: Vec<u8>,
    /// Index of the next unread byte
    pos: usize,
}

impl InMemoryByteSource {
    /// Wraps `bytes`, starting at the first byte.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Reads the entire file at `path` into memory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        Ok(Self::from_vec(fs::read(path)?))
    }

    /// Returns the bytes not consumed yet.
    pub fn remaining(&self) -> &[u8] {
        &self.input[self.pos..]
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&mut self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn get_context(&mut self, k: usize) -> Vec<u8> {
        self.remaining().iter().take(k).copied().collect()
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.remaining().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_and_context() {
        let mut source = InMemoryByteSource::from_vec(b"0110".to_vec());
        source.next_byte();
        assert_eq!(source.remaining(), b"110");
        assert_eq!(source.get_context(2), b"11".to_vec());
        assert_eq!(source.get_context(50), b"110".to_vec());
        assert!(source.take_error().is_none());
    }
}
