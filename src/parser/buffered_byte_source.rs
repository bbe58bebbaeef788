//! Buffered reader implementation of byte source for parser.
//!
//! This module provides [BufferedByteSource], which wraps any reader in a
//! [BufReader] for streaming I/O. Use this for long bitstreams where loading
//! everything into memory would be impractical, or for pipes.

use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::parser::byte_source::ByteSource;

// =#========================================================================#=
// BUFFERED BYTE SOURCE
// =#========================================================================$=
/// A buffered byte source for streaming large inputs.
///
/// Error context is taken from whatever the [BufReader] currently holds, so it
/// may be shorter than requested near a buffer boundary. In exchange the
/// underlying reader never needs to seek.
///
/// A failed read ends the input. The error is kept for
/// [take_error](ByteSource::take_error) and no further reads are attempted.
pub struct BufferedByteSource<R: Read> {
    /// Underlying reader, handles getting chunks from the input
    reader: BufReader<R>,

    /// Current absolute position in the stream
    pos: usize,

    /// Set by the first failed read
    failed: bool,
    error: Option<io::Error>,
}

impl BufferedByteSource<File> {
    /// Creates a new buffered byte source from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> BufferedByteSource<R> {
    /// Creates a new buffered byte source wrapping `reader`.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pos: 0,
            failed: false,
            error: None,
        }
    }

    /// Creates a new buffered byte source with a specific buffer capacity.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            pos: 0,
            failed: false,
            error: None,
        }
    }

    /// Returns the buffered bytes, refilling from the reader when empty.
    ///
    /// Empty means end of data or a recorded read error.
    fn buffer(&mut self) -> &[u8] {
        if self.failed {
            return &[];
        }
        loop {
            match self.reader.fill_buf().map(|_| ()) {
                Ok(()) => return self.reader.buffer(),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.failed = true;
                    self.error = Some(err);
                    return &[];
                }
            }
        }
    }
}

impl<R: Read> ByteSource for BufferedByteSource<R> {
    fn peek(&mut self) -> Option<u8> {
        self.buffer().first().copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.reader.consume(1);
        self.pos += 1;
        Some(byte)
    }

    fn get_context(&mut self, k: usize) -> Vec<u8> {
        let buf = self.buffer();
        buf[..k.min(buf.len())].to_vec()
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.buffer().is_empty()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

// =#========================================================================#=
// TESTS - BUFFERED BYTE SOURCE
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_reads_across_buffer_boundary() {
        let data = b"0110\n1001".to_vec();
        let mut source = BufferedByteSource::with_capacity(2, data.as_slice());
        let mut read = Vec::new();
        while let Some(b) = source.next_byte() {
            read.push(b);
        }
        assert_eq!(read, data);
        assert_eq!(source.position(), 9);
        assert!(source.is_eof());
    }

    #[test]
    fn test_buffered_context_limited_to_buffer() {
        let mut source = BufferedByteSource::with_capacity(4, &b"0123456789"[..]);
        source.next_byte();
        let context = source.get_context(50);
        assert_eq!(context, b"123".to_vec());
    }

    /// Reader that hands out `data`, then fails.
    struct FailingReader {
        data: &'static [u8],
        interrupted: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "again"));
            }
            if self.data.is_empty() {
                return Err(io::Error::other("device lost"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_read_error_is_kept_and_sticky() {
        let reader = FailingReader {
            data: b"01",
            interrupted: false,
        };
        let mut source = BufferedByteSource::with_capacity(2, reader);
        assert_eq!(source.next_byte(), Some(b'0'));
        assert_eq!(source.next_byte(), Some(b'1'));
        assert_eq!(source.next_byte(), None);
        assert!(source.is_eof());

        let err = source.take_error().unwrap();
        assert_eq!(err.to_string(), "device lost");
        assert!(source.take_error().is_none());
        assert_eq!(source.peek(), None);
        assert_eq!(source.position(), 2);
    }

    #[test]
    fn test_clean_eof_has_no_error() {
        let mut source = BufferedByteSource::from_reader(&b"0"[..]);
        assert_eq!(source.next_byte(), Some(b'0'));
        assert!(source.is_eof());
        assert!(source.take_error().is_none());
    }

    #[test]
    fn test_buffered_from_file() {
        let mut source = BufferedByteSource::from_file("tests/fixtures/abc.code").unwrap();
        assert_eq!(source.peek(), Some(b'0'));
    }
}
