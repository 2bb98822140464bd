//! Java-style `.properties` scanner.
//!
//! One entity per logical line (`key = value` or `key: value`, with
//! backslash line continuations). Lines starting with `#` or `!` are
//! comments, one record per line.

use super::{line_end, next_line_start, take_blank};
use crate::types::{Comment, CommentKind, Entity, FileFormat, Junk, Record};

pub fn parse(text: &str) -> Vec<Record<'_>> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < text.len() {
        offset = take_blank(text, offset, &mut records);
        if offset >= text.len() {
            break;
        }

        let rest = &text[offset..];
        if rest.starts_with('#') || rest.starts_with('!') {
            let end = line_end(text, offset);
            records.push(Record::Comment(Comment {
                kind: CommentKind::Note,
                raw: &text[offset..end],
            }));
            offset = end;
            continue;
        }

        let end = logical_line_end(text, offset);
        let raw = &text[offset..end];
        match split_key(raw) {
            Some(key) => records.push(Record::Entity(Entity {
                format: FileFormat::Properties,
                key,
                raw,
            })),
            None => records.push(Record::Junk(Junk { offset, raw })),
        }
        offset = end;
    }

    records
}

/// End of the logical line starting at `offset`, following continuations.
fn logical_line_end(text: &str, offset: usize) -> usize {
    let mut end = line_end(text, offset);
    while continues(&text[offset..end]) {
        let next = next_line_start(text, end);
        if next >= text.len() {
            break;
        }
        end = line_end(text, next);
    }
    end
}

/// A line continues onto the next one when it ends with an odd number of
/// backslashes.
fn continues(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

/// Extract the key of a logical line, or `None` when the line has no
/// `=`/`:` separator.
fn split_key(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'=' | b':' | b' ' | b'\t' | b'\r' | b'\n' => break,
            _ => i += 1,
        }
    }
    let i = i.min(bytes.len());
    if i == 0 {
        return None;
    }

    let rest = raw[i..].trim_start_matches([' ', '\t']);
    if rest.starts_with('=') || rest.starts_with(':') {
        Some(&raw[..i])
    } else {
        None
    }
}
