//! Entity stream parsers.
//!
//! Each format has its own scanner turning raw text into an ordered list of
//! [`Record`]s. Scanners are stateless between calls: parsing the primary and
//! the alternative version of a file are two independent calls.
//!
//! Concatenating the raw text of all records reproduces the input exactly.

pub mod android;
pub mod dtd;
pub mod fluent;
pub mod properties;

use crate::types::{Blank, FileFormat, Junk, Record};

/// Parse `text` as the given format.
pub fn parse(format: FileFormat, text: &str) -> Vec<Record<'_>> {
    match format {
        FileFormat::Fluent => fluent::parse(text),
        FileFormat::Dtd => dtd::parse(text),
        FileFormat::AndroidStrings => android::parse(text),
        FileFormat::Properties => properties::parse(text),
    }
}

/// Length of the run of spaces, tabs and line breaks at the start of `rest`.
pub(crate) fn whitespace_len(rest: &str) -> usize {
    rest.bytes()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .count()
}

/// Offset of the end of the line containing `offset`, excluding the line
/// break (and a carriage return before it).
pub(crate) fn line_end(text: &str, offset: usize) -> usize {
    let end = text[offset..]
        .find('\n')
        .map_or(text.len(), |pos| offset + pos);
    if end > offset && text.as_bytes()[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}

/// Offset of the start of the line following the one containing `offset`,
/// or the end of the text.
pub(crate) fn next_line_start(text: &str, offset: usize) -> usize {
    text[offset..]
        .find('\n')
        .map_or(text.len(), |pos| offset + pos + 1)
}

/// Whether `offset` is at the first column of a line.
pub(crate) fn at_line_start(text: &str, offset: usize) -> bool {
    offset == 0 || text.as_bytes()[offset - 1] == b'\n'
}

/// Push a blank record for the whitespace at `offset`, returning the new
/// offset.
pub(crate) fn take_blank<'a>(text: &'a str, offset: usize, out: &mut Vec<Record<'a>>) -> usize {
    let len = whitespace_len(&text[offset..]);
    if len > 0 {
        out.push(Record::Blank(Blank {
            raw: &text[offset..offset + len],
        }));
    }
    offset + len
}

/// Push a junk record covering the rest of the line at `offset`.
pub(crate) fn take_junk_line<'a>(
    text: &'a str,
    offset: usize,
    out: &mut Vec<Record<'a>>,
) -> usize {
    let end = line_end(text, offset).max(offset + 1).min(text.len());
    let end = ceil_char_boundary(text, end);
    out.push(Record::Junk(Junk {
        offset,
        raw: &text[offset..end],
    }));
    end
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
