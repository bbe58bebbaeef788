//! Header format (`.hdr`) parser and writer.
//!
//! A header maps tokens to codes, one record per line:
//! * `record ::= token ' ' code`
//! * `token` is everything before the first space, `code` everything after it
//! * Empty lines are skipped, a trailing `'\r'` is stripped
//! * The first non-empty line must begin with an ASCII letter
//!
//! # Example
//! ```text
//! the 0
//! cat 10
//! sat 11
//! ```
//!
//! # Quick API
//! * [parse_str] - parses header text into [HeaderEntry]s
//! * [crate::parse_header_file] - parses a header file
//! * [write_header] / [to_header_string] - writes the code table of a tree

mod parser;
mod writer;

pub use self::parser::parse_header;
pub use self::writer::{to_header_string, write_header};

use crate::error::HuffError;
use crate::parser::ByteParser;

// =#========================================================================#=
// HEADER ENTRY
// =#========================================================================#=
/// One header record: a token and its code.
///
/// Entries are stored as read; validating the code is left to the
/// [tree builder](crate::model::tree_builder).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderEntry {
    token: String,
    code: String,
}

impl HeaderEntry {
    /// Creates a new entry.
    pub fn new<T: Into<String>, C: Into<String>>(token: T, code: C) -> Self {
        Self {
            token: token.into(),
            code: code.into(),
        }
    }

    /// Returns the token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns `(token, code)`, e.g. to feed [build](crate::model::tree_builder::build).
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.token, &self.code)
    }
}

impl From<(String, String)> for HeaderEntry {
    fn from((token, code): (String, String)) -> Self {
        Self { token, code }
    }
}

/// Parses header text into its entries.
///
/// # Example
/// ```
/// use huffdec::header::parse_str;
///
/// let entries = parse_str("the 0\n\ncat 10\r\nsat 11\n")?;
/// assert_eq!(entries.len(), 3);
/// assert_eq!(entries[1].as_pair(), ("cat", "10"));
/// # Ok::<(), huffdec::HuffError>(())
/// ```
pub fn parse_str<S: AsRef<str>>(header: S) -> Result<Vec<HeaderEntry>, HuffError> {
    let mut byte_parser = ByteParser::for_str(header.as_ref());
    parse_header(&mut byte_parser)
}
