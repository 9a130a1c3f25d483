//! Manifest document parser
//!
//! Reads the main section of a JAR-style `MANIFEST.MF` document:
//!
//! ```text
//! Manifest-Version: 1.0
//! Built-By: ci
//! Long-Value: first half of the value that is folded onto
//!  the next line
//!
//! Name: per-entry sections after the first blank line are ignored
//! ```
//!
//! Continuations are joined as raw bytes before UTF-8 decoding, so a value may
//! be folded in the middle of a multi-byte character.

use std::collections::HashMap;
use std::io::Read;

use tracing::warn;

use crate::error::{ParseError, ParseErrorKind};

/// Longest attribute name accepted
pub const MAX_NAME_LENGTH: usize = 70;

/// Size limits applied while parsing one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Longest line, terminator excluded
    pub max_line_bytes: usize,
    /// Largest document accepted
    pub max_document_bytes: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_line_bytes: 512,
            max_document_bytes: 1024 * 1024,
        }
    }
}

/// Parse the main section of a manifest read from `reader`.
///
/// Returns the attributes in order of first appearance. A name repeated within
/// the same document keeps its original position and takes the later value.
pub fn parse_main_section<R: Read + ?Sized>(
    reader: &mut R,
    limits: &ParseLimits,
) -> Result<Vec<(String, String)>, ParseError> {
    let mut buf = Vec::new();
    let cap = (limits.max_document_bytes as u64).saturating_add(1);
    reader
        .take(cap)
        .read_to_end(&mut buf)
        .map_err(|e| ParseError {
            line: 0,
            kind: ParseErrorKind::Io(e.to_string()),
        })?;
    if buf.len() > limits.max_document_bytes {
        return Err(ParseError {
            line: 0,
            kind: ParseErrorKind::DocumentTooLarge {
                max: limits.max_document_bytes,
            },
        });
    }
    parse_bytes(&buf, limits)
}

/// Parse the main section of an in-memory manifest
pub fn parse_str(text: &str) -> Result<Vec<(String, String)>, ParseError> {
    parse_main_section(&mut text.as_bytes(), &ParseLimits::default())
}

struct RawEntry {
    name: String,
    value: Vec<u8>,
    line: usize,
}

fn parse_bytes(buf: &[u8], limits: &ParseLimits) -> Result<Vec<(String, String)>, ParseError> {
    let mut entries: Vec<RawEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    for (i, raw) in split_lines(buf).into_iter().enumerate() {
        let line = i + 1;
        let fail = |kind| ParseError { line, kind };

        if raw.len() > limits.max_line_bytes {
            return Err(fail(ParseErrorKind::LineTooLong {
                max: limits.max_line_bytes,
            }));
        }
        // End of the main section
        if raw.is_empty() {
            break;
        }

        if raw[0] == b' ' {
            let slot = current.ok_or_else(|| fail(ParseErrorKind::MisplacedContinuation))?;
            entries[slot].value.extend_from_slice(&raw[1..]);
            continue;
        }

        let (name, value) = split_header(raw).ok_or_else(|| fail(ParseErrorKind::InvalidHeader))?;
        if !is_valid_name(name) {
            return Err(fail(ParseErrorKind::InvalidName(
                String::from_utf8_lossy(name).into_owned(),
            )));
        }
        // Validated as ASCII above
        let name = String::from_utf8_lossy(name).into_owned();

        match index.get(&name) {
            Some(&slot) => {
                warn!(attribute = %name, line, "duplicate attribute in manifest, later value kept");
                entries[slot].value = value.to_vec();
                entries[slot].line = line;
                current = Some(slot);
            }
            None => {
                index.insert(name.clone(), entries.len());
                current = Some(entries.len());
                entries.push(RawEntry {
                    name,
                    value: value.to_vec(),
                    line,
                });
            }
        }
    }

    entries
        .into_iter()
        .map(|entry| {
            let line = entry.line;
            String::from_utf8(entry.value)
                .map(|value| (entry.name, value))
                .map_err(|_| ParseError {
                    line,
                    kind: ParseErrorKind::InvalidUtf8,
                })
        })
        .collect()
}

/// Split on `\r\n`, `\n` or `\r`; an unterminated last line is kept
fn split_lines(buf: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < buf.len() {
        match buf[i] {
            b'\n' => {
                lines.push(&buf[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&buf[start..i]);
                i += 1;
                if buf.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < buf.len() {
        lines.push(&buf[start..]);
    }
    lines
}

/// `Name: value`; the space after the colon is mandatory
fn split_header(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let colon = line.iter().position(|&b| b == b':')?;
    let rest = line[colon + 1..].strip_prefix(b" ")?;
    Some((&line[..colon], rest))
}

fn is_valid_name(name: &[u8]) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LENGTH
        && name
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
}
