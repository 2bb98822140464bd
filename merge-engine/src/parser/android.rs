//! Android string resource (`strings.xml`) scanner.
//!
//! The XML structure is walked with `quick-xml`, but records are cut from
//! the source using reader positions so every span is kept byte-for-byte.
//! Direct children of `<resources>` carrying a `name` attribute are
//! entities; the document around them is reported as two wrapper records.

use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;

use crate::types::{Blank, Comment, CommentKind, Entity, FileFormat, Junk, Record};

pub const ROOT: &[u8] = b"resources";

static NAME_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\sname\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid name attribute regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeRoot,
    InRoot,
}

pub fn parse(text: &str) -> Vec<Record<'_>> {
    let mut records = Vec::new();
    let mut reader = Reader::from_str(text);
    let mut state = State::BeforeRoot;

    loop {
        let start = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(_) => {
                push_junk(text, start, text.len(), &mut records);
                return records;
            }
        };
        let end = reader.buffer_position() as usize;

        match (state, event) {
            (_, Event::Eof) => {
                if state == State::BeforeRoot {
                    push_junk(text, 0, text.len(), &mut records);
                }
                return records;
            }
            (State::BeforeRoot, Event::Start(e)) if e.name().as_ref() == ROOT => {
                records.push(Record::Wrapper(&text[..end]));
                state = State::InRoot;
            }
            (
                State::BeforeRoot,
                Event::Decl(_) | Event::DocType(_) | Event::PI(_) | Event::Comment(_),
            ) => {}
            (State::BeforeRoot, Event::Text(_)) if text[start..end].trim().is_empty() => {}
            (State::BeforeRoot, _) => {
                push_junk(text, start, text.len(), &mut records);
                return records;
            }
            (State::InRoot, Event::Text(_)) => {
                let raw = &text[start..end];
                if raw.trim().is_empty() {
                    records.push(Record::Blank(Blank { raw }));
                } else {
                    push_junk(text, start, end, &mut records);
                }
            }
            (State::InRoot, Event::Comment(_)) => {
                records.push(Record::Comment(Comment {
                    kind: CommentKind::Note,
                    raw: &text[start..end],
                }));
            }
            (State::InRoot, Event::Start(e)) => {
                let tag = &text[start..end];
                if reader.read_to_end(e.name()).is_err() {
                    push_junk(text, start, text.len(), &mut records);
                    return records;
                }
                let element_end = reader.buffer_position() as usize;
                push_element(text, tag, start, element_end, &mut records);
            }
            (State::InRoot, Event::Empty(_)) => {
                let tag = &text[start..end];
                push_element(text, tag, start, end, &mut records);
            }
            (State::InRoot, Event::End(_)) => {
                // check_end_names guarantees this closes the root element.
                let rest = &text[end..];
                if rest.trim().is_empty() {
                    records.push(Record::Wrapper(&text[start..]));
                } else {
                    records.push(Record::Wrapper(&text[start..end]));
                    push_junk(text, end, text.len(), &mut records);
                }
                return records;
            }
            (State::InRoot, _) => push_junk(text, start, end, &mut records),
        }
    }
}

/// Push an entity for the element at `start..end`, or junk when the element
/// has no `name`.
fn push_element<'a>(
    text: &'a str,
    tag: &'a str,
    start: usize,
    end: usize,
    records: &mut Vec<Record<'a>>,
) {
    match name_attribute(tag) {
        Some(key) => records.push(Record::Entity(Entity {
            format: FileFormat::AndroidStrings,
            key,
            raw: &text[start..end],
        })),
        None => push_junk(text, start, end, records),
    }
}

/// Value of the `name` attribute within an element's start tag.
pub fn name_attribute(tag: &str) -> Option<&str> {
    let caps = NAME_ATTR.captures(tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
}

fn push_junk<'a>(text: &'a str, start: usize, end: usize, records: &mut Vec<Record<'a>>) {
    records.push(Record::Junk(Junk {
        offset: start,
        raw: &text[start..end],
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\"?>\n<resources>";

    #[test]
    fn test_parse_strings() {
        let text = format!(
            "{HEAD}\n    <!-- Comment -->\n    <string name=\"string_1\">First</string>\n    <string name='empty'/>\n</resources>\n"
        );
        let records = parse(&text);
        assert_eq!(records[0], Record::Wrapper(HEAD));
        assert!(matches!(records[1], Record::Blank(b) if b.raw == "\n    " && !b.separates()));
        assert!(matches!(records[2], Record::Comment(c) if c.raw == "<!-- Comment -->"));
        let entities: Vec<_> = records.iter().filter_map(|r| r.as_entity()).collect();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].key, "string_1");
        assert_eq!(entities[0].raw, "<string name=\"string_1\">First</string>");
        assert_eq!(entities[1].key, "empty");
        assert_eq!(records.last(), Some(&Record::Wrapper("</resources>\n")));
    }

    #[test]
    fn test_nested_markup_and_plurals() {
        let text = format!(
            "{HEAD}\n<string name=\"bold\">Hi <b>there</b></string>\n<plurals name=\"tabs\">\n    <item quantity=\"one\">%d tab</item>\n</plurals>\n</resources>"
        );
        let records = parse(&text);
        let entities: Vec<_> = records.iter().filter_map(|r| r.as_entity()).collect();
        assert_eq!(entities[0].raw, "<string name=\"bold\">Hi <b>there</b></string>");
        assert_eq!(entities[1].key, "tabs");
        assert!(entities[1].raw.ends_with("</plurals>"));
    }

    #[test]
    fn test_element_without_name_is_junk() {
        let text = format!("{HEAD}\n<string>First</string>\n</resources>\n");
        let records = parse(&text);
        assert!(records.iter().any(|r| matches!(r, Record::Junk(_))));
    }

    #[test]
    fn test_missing_root_is_junk() {
        let records = parse("<?xml version=\"1.0\"?>\n");
        assert!(matches!(records[0], Record::Junk(j) if j.offset == 0));
    }

    #[test]
    fn test_name_attribute() {
        assert_eq!(name_attribute("<string name=\"a_b\">"), Some("a_b"));
        assert_eq!(name_attribute("<string\n  name = 'x' >"), Some("x"));
        assert_eq!(name_attribute("<string tools:name=\"x\">"), None);
        assert_eq!(name_attribute("<string name=\"\">"), None);
    }
}
