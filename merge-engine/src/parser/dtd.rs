//! DTD entity declaration scanner.
//!
//! Recognizes `<!ENTITY name "value">` declarations and `<!-- -->` comments.
//! Parameter entities and other markup declarations are reported as junk.

use std::sync::LazyLock;

use regex::Regex;

use super::{take_blank, take_junk_line};
use crate::types::{Comment, CommentKind, Entity, FileFormat, Junk, Record};

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\A<!ENTITY\s+([\p{L}_:][\p{L}\p{N}._:\-]*)\s+(?:"[^"]*"|'[^']*')\s*>"#)
        .expect("valid DTD entity regex")
});

pub fn parse(text: &str) -> Vec<Record<'_>> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < text.len() {
        offset = take_blank(text, offset, &mut records);
        if offset >= text.len() {
            break;
        }

        let rest = &text[offset..];
        if rest.starts_with("<!--") {
            match rest[4..].find("-->") {
                Some(pos) => {
                    let end = offset + 4 + pos + 3;
                    records.push(Record::Comment(Comment {
                        kind: CommentKind::Note,
                        raw: &text[offset..end],
                    }));
                    offset = end;
                }
                None => {
                    records.push(Record::Junk(Junk { offset, raw: rest }));
                    offset = text.len();
                }
            }
            continue;
        }

        if let Some(caps) = ENTITY.captures(rest) {
            let (Some(all), Some(key)) = (caps.get(0), caps.get(1)) else {
                offset = take_junk_line(text, offset, &mut records);
                continue;
            };
            records.push(Record::Entity(Entity {
                format: FileFormat::Dtd,
                key: key.as_str(),
                raw: all.as_str(),
            }));
            offset += all.end();
            continue;
        }

        offset = take_junk_line(text, offset, &mut records);
    }

    records
}
