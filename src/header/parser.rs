//! Line-oriented parser for header files.

use crate::error::{HuffError, HuffErrorKind};
use crate::header::HeaderEntry;
use crate::parser::{ByteParser, ByteSource};
use tracing::debug;

/// Separator between token and code within a record.
const FIELD_SEPARATOR: u8 = b' ';

/// Parses all header records until EOF.
///
/// Errors carry the 1-based line number as position and the line as context.
///
/// # Errors
/// * [HuffErrorKind::MalformedHeader] - first record does not begin with a
///   letter, a line has no space, or a line is not valid UTF-8
/// * [HuffErrorKind::MalformedEntry] - token or code is empty
/// * [HuffErrorKind::Io] - reading the input failed
pub fn parse_header<S: ByteSource>(
    byte_parser: &mut ByteParser<S>,
) -> Result<Vec<HeaderEntry>, HuffError> {
    let mut entries = Vec::new();
    let mut line_number = 0;

    while !byte_parser.is_eof() {
        let line = byte_parser.consume_line();
        byte_parser.check_read_error()?;
        line_number += 1;
        if line.is_empty() {
            continue;
        }

        let line = String::from_utf8(line).map_err(|err| {
            line_error(
                HuffErrorKind::MalformedHeader("line is not valid UTF-8".to_string()),
                line_number,
                &String::from_utf8_lossy(err.as_bytes()),
            )
        })?;

        if entries.is_empty() && !line.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(line_error(
                HuffErrorKind::MalformedHeader("header must start with a letter".to_string()),
                line_number,
                &line,
            ));
        }

        let Some((token, code)) = line.split_once(char::from(FIELD_SEPARATOR)) else {
            return Err(line_error(
                HuffErrorKind::MalformedHeader("line has no space".to_string()),
                line_number,
                &line,
            ));
        };
        if token.is_empty() || code.is_empty() {
            return Err(line_error(HuffErrorKind::MalformedEntry, line_number, &line));
        }

        entries.push(HeaderEntry::new(token, code));
    }

    debug!(entries = entries.len(), lines = line_number, "parsed header");
    Ok(entries)
}

fn line_error(kind: HuffErrorKind, line_number: usize, line: &str) -> HuffError {
    HuffError::new(kind, Some(line_number), line.to_string())
}
