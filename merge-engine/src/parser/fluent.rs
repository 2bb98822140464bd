//! Fluent (`.ftl`) scanner.
//!
//! Handles messages, terms and the three comment levels. Entries start at
//! the first column and continue over indented lines. Blank lines inside an
//! entry are kept when an indented line follows them.

use std::sync::LazyLock;

use regex::Regex;

use super::{at_line_start, line_end, next_line_start, take_blank, take_junk_line};
use crate::types::{Comment, CommentKind, Entity, FileFormat, GroupComment, Junk, Record};

static ENTRY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A(-?[a-zA-Z][a-zA-Z0-9_-]*)[ \t]*=").expect("valid Fluent identifier regex")
});

pub fn parse(text: &str) -> Vec<Record<'_>> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < text.len() {
        offset = take_blank(text, offset, &mut records);
        if offset >= text.len() {
            break;
        }
        if !at_line_start(text, offset) {
            // Indented content outside of an entry.
            offset = take_junk_line(text, offset, &mut records);
            continue;
        }

        let line = &text[offset..line_end(text, offset)];
        if let Some(level) = comment_level(line) {
            let end = comment_end(text, offset, level);
            let raw = &text[offset..end];
            records.push(match level {
                1 => Record::Comment(Comment {
                    kind: CommentKind::Note,
                    raw,
                }),
                2 => Record::GroupComment(GroupComment { raw }),
                _ => Record::Comment(Comment {
                    kind: CommentKind::Resource,
                    raw,
                }),
            });
            offset = end;
            continue;
        }

        let Some(key) = ENTRY_START.captures(line).and_then(|caps| caps.get(1)) else {
            offset = take_junk_line(text, offset, &mut records);
            continue;
        };
        let key = &text[offset + key.start()..offset + key.end()];
        let end = entry_end(text, offset);
        let raw = &text[offset..end];
        if has_content(raw) {
            records.push(Record::Entity(Entity {
                format: FileFormat::Fluent,
                key,
                raw,
            }));
        } else {
            records.push(Record::Junk(Junk { offset, raw }));
        }
        offset = end;
    }

    records
}

/// Comment level of a line: 1 for `#`, 2 for `##`, 3 for `###`.
fn comment_level(line: &str) -> Option<usize> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    (rest.is_empty() || rest.starts_with(' ')).then_some(level)
}

/// End of a comment starting at `offset`: consecutive lines of the same
/// level belong to one comment.
fn comment_end(text: &str, offset: usize, level: usize) -> usize {
    let mut end = line_end(text, offset);
    loop {
        let next = next_line_start(text, end);
        if next >= text.len() {
            return end;
        }
        let line = &text[next..line_end(text, next)];
        if comment_level(line) != Some(level) {
            return end;
        }
        end = line_end(text, next);
    }
}

/// End of the entry starting at `offset`.
fn entry_end(text: &str, offset: usize) -> usize {
    let mut end = line_end(text, offset);
    loop {
        let mut probe = next_line_start(text, end);
        while probe < text.len() && is_blank_line(text, probe) {
            probe = next_line_start(text, probe);
        }
        if probe < text.len() && text.as_bytes()[probe] == b' ' {
            end = line_end(text, probe);
        } else {
            return end;
        }
    }
}

fn is_blank_line(text: &str, offset: usize) -> bool {
    text[offset..line_end(text, offset)].trim().is_empty()
}

/// A message or term needs a value or at least one attribute.
fn has_content(raw: &str) -> bool {
    raw.split_once('=')
        .is_some_and(|(_, value)| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_terms() {
        let text = "string-1 = First\n-brand-name = Tor\nstring-2 =\n    .attr = Second\n";
        let records = parse(text);
        let entities: Vec<_> = records.iter().filter_map(|r| r.as_entity()).collect();
        let keys: Vec<_> = entities.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["string-1", "-brand-name", "string-2"]);
        assert_eq!(entities[2].raw, "string-2 =\n    .attr = Second");
    }

    #[test]
    fn test_multiline_with_blank_lines() {
        let text = "a =\n    one\n\n    two\n\nb = 2\n";
        let records = parse(text);
        assert_eq!(records[0].raw(), "a =\n    one\n\n    two");
        assert!(matches!(records[1], Record::Blank(b) if b.separates()));
        assert_eq!(records[2].raw(), "b = 2");
    }

    #[test]
    fn test_comment_levels() {
        let text = "### Resource\n\n## Second\n## Group comment\n\n# Note\n# More\nx = 1\n##\n";
        let records = parse(text);
        assert!(matches!(
            records[0],
            Record::Comment(Comment { kind: CommentKind::Resource, raw: "### Resource" })
        ));
        assert!(matches!(records[2], Record::GroupComment(g) if g.raw == "## Second\n## Group comment"));
        assert!(matches!(
            records[4],
            Record::Comment(Comment { kind: CommentKind::Note, raw: "# Note\n# More" })
        ));
        assert!(matches!(records[5], Record::Blank(b) if !b.separates()));
        assert_eq!(records[6].as_entity().map(|e| e.key), Some("x"));
        assert!(matches!(records[8], Record::GroupComment(g) if g.is_empty()));
    }

    #[test]
    fn test_mixed_levels_split() {
        let records = parse("# Note\n## Group\n");
        assert!(matches!(records[0], Record::Comment(c) if c.raw == "# Note"));
        assert!(matches!(records[2], Record::GroupComment(g) if g.raw == "## Group"));
    }

    #[test]
    fn test_junk() {
        assert!(matches!(parse("  indented = 1\n")[1], Record::Junk(_)));
        assert!(matches!(parse("#nospace\n")[0], Record::Junk(_)));
        assert!(matches!(parse("empty =\n")[0], Record::Junk(_)));
        assert!(matches!(parse("1bad = x\n")[0], Record::Junk(_)));
    }
}
