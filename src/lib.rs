//! Huffdec is a library to decode Huffman-coded token streams.
//!
//! Given a header mapping tokens to binary codes and a bitstream of `0`/`1`
//! characters, this crate rebuilds the token sequence. Core functionality:
//! - Header: Parse `token code` records from `.hdr` files (see [header]).
//! - Tree builder: Build a [PrefixTree] from `(token, code)` pairs, rejecting
//!   duplicate codes, prefix conflicts and non-binary code characters.
//! - Decoder: Stream a bitstream through the tree, emitting one token per
//!   reached leaf, and rejecting invalid characters, invalid branches and
//!   truncated streams (see [decoder]).
//! - Byte sources: Read bitstreams fully into memory or stream them through a
//!   buffered reader (see [parser]).
//!
//! Limitations:
//! - Only decoding; codes are never computed from token frequencies
//! - No recovery: the first structural defect aborts the whole operation
//!
//! # Usage patterns
//! 1. [decode_files] decodes a header and a code file into an output file.
//! 2. Build a tree with [build_tree] and drive a
//!    [StreamDecoder](decoder::StreamDecoder) yourself for full control over
//!    byte source, sink and record separator.
//!
//! ## Example
//!
//! ```
//! use huffdec::build_tree;
//! use huffdec::decoder::StreamDecoder;
//! use huffdec::parser::ByteParser;
//!
//! let tree = build_tree([("a", "00"), ("b", "01"), ("c", "1")])?;
//! let tokens = StreamDecoder::new(&tree, ByteParser::for_str("1\n0001"))
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(tokens, ["c", "a", "b"]);
//! # Ok::<(), huffdec::HuffError>(())
//! ```
//!
//! Decode files:
//! ```no_run
//! use huffdec::decode_files;
//!
//! let count = decode_files("story.hdr", "story.code", "story.tokens_decoded")?;
//! println!("Decoded {count} tokens");
//! # Ok::<(), huffdec::HuffError>(())
//! ```

pub mod decoder;
pub mod error;
pub mod header;
pub mod model;
pub mod parser;

pub use crate::error::{HuffError, HuffErrorKind};
pub use crate::model::PrefixTree;

use crate::decoder::HuffmanDecoder;
use crate::header::HeaderEntry;
use crate::parser::{BufferedByteSource, ByteParser, InMemoryByteSource};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File extension of decoded token output.
pub const DECODED_EXTENSION: &str = "tokens_decoded";

// ============================================================================
// Quick Build API
// ============================================================================
/// Builds a [PrefixTree] from an ordered sequence of `(token, code)` pairs.
///
/// See [`model::tree_builder::build`] for full documentation.
pub fn build_tree<I, T, C>(pairs: I) -> Result<PrefixTree, HuffError>
where
    I: IntoIterator<Item = (T, C)>,
    T: AsRef<str>,
    C: AsRef<str>,
{
    model::tree_builder::build(pairs)
}

// ============================================================================
// Quick File API
// ============================================================================
/// Reads and parses a header file into its entries.
///
/// See [`header::parse_header`] for the format and errors.
pub fn parse_header_file<P: AsRef<Path>>(path: P) -> Result<Vec<HeaderEntry>, HuffError> {
    let source = InMemoryByteSource::from_file(path)?;
    header::parse_header(&mut ByteParser::new(source))
}

/// Checks that the first byte of the code file, ignoring line breaks, is `0` or `1`.
///
/// # Errors
/// * [HuffErrorKind::InvalidCodeFileStart] - empty file or other first byte
/// * [HuffErrorKind::Io] - file cannot be read
pub fn check_code_file_start<P: AsRef<Path>>(path: P) -> Result<(), HuffError> {
    let mut byte_parser = ByteParser::new(BufferedByteSource::from_file(path)?);
    match byte_parser.first_significant_byte() {
        Some(b'0' | b'1') => Ok(()),
        byte => {
            if byte.is_none() {
                byte_parser.check_read_error()?;
            }
            Err(HuffError::from_parser(
                HuffErrorKind::InvalidCodeFileStart,
                &mut byte_parser,
            ))
        }
    }
}

/// Returns `<dir>/<header stem>.tokens_decoded`.
///
/// # Example
/// ```
/// use huffdec::output_path_for;
/// use std::path::Path;
///
/// let out = output_path_for("input_output", "story.hdr");
/// assert_eq!(out, Path::new("input_output/story.tokens_decoded"));
/// ```
pub fn output_path_for<D: AsRef<Path>, H: AsRef<Path>>(dir: D, header: H) -> PathBuf {
    let stem = header
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.as_ref().join(format!("{stem}.{DECODED_EXTENSION}"))
}

/// How a code file is read for decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodeSource {
    /// Stream through a buffered reader; size is not limited by memory
    #[default]
    Streamed,
    /// Read the whole file into memory first
    InMemory,
}

/// Parses the header file and builds a decoder from it.
///
/// # Errors
/// Header errors (see [header::parse_header]) or build errors, which are
/// told apart by [HuffError::is_build_error].
pub fn load_decoder<P: AsRef<Path>>(header: P) -> Result<HuffmanDecoder, HuffError> {
    let entries = parse_header_file(&header)?;
    let mut decoder = HuffmanDecoder::new();
    decoder.build_from_header(&entries)?;
    info!(
        header = %header.as_ref().display(),
        tokens = decoder.tree().num_leaves(),
        depth = decoder.tree().depth(),
        "built decoding tree"
    );
    Ok(decoder)
}

/// Creates (or truncates) the output file.
///
/// # Errors
/// [HuffErrorKind::OutputWriteFailure] if the file cannot be opened for writing.
pub fn create_output<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>, HuffError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(HuffError::output_write_failure)
}

/// Decodes the code file with `decoder`, writing one token per line to `out`.
///
/// On a decode error, the tokens decoded so far remain in `out`.
///
/// # Returns
/// The number of decoded tokens.
pub fn decode_code_file<P, W>(
    decoder: &HuffmanDecoder,
    code: P,
    out: W,
    source: CodeSource,
) -> Result<usize, HuffError>
where
    P: AsRef<Path>,
    W: Write,
{
    let count = match source {
        CodeSource::Streamed => {
            let source = BufferedByteSource::from_file(&code)?;
            decoder.decode(ByteParser::new(source), out)?
        }
        CodeSource::InMemory => {
            let source = InMemoryByteSource::from_file(&code)?;
            decoder.decode(ByteParser::new(source), out)?
        }
    };
    info!(code = %code.as_ref().display(), ?source, tokens = count, "decoded file");
    Ok(count)
}

/// Decodes the code file against the header file, writing one token per line
/// to the output file (created or truncated).
///
/// The code file is streamed, so its size is not limited by memory. On a
/// decode error, the tokens decoded so far remain in the output file.
///
/// # Returns
/// The number of decoded tokens.
///
/// # Errors
/// Header parsing, build, and decode errors as [HuffError]; failure to
/// create the output file is reported as [HuffErrorKind::OutputWriteFailure].
pub fn decode_files<H, C, O>(header: H, code: C, output: O) -> Result<usize, HuffError>
where
    H: AsRef<Path>,
    C: AsRef<Path>,
    O: AsRef<Path>,
{
    let decoder = load_decoder(header)?;
    let out = create_output(output)?;
    decode_code_file(&decoder, code, out, CodeSource::Streamed)
}
