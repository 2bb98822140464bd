//! Format adapters.
//!
//! Everything the merge engine needs to know about a file format beyond its
//! record stream lives behind [`FormatAdapter`]: how the document is wrapped,
//! how a reason comment is written, and how an identifier is found at its
//! declaration site for renaming.
//!
//! Renaming works on the raw entity text with a regular expression. The
//! pattern is anchored to the declaration, never to uses of the key inside a
//! value, and must match exactly once.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CombineError, CombineResult};
use crate::parser;
use crate::types::{CommentKind, Document, FileFormat, Record};

/// Format specific knowledge used by the merge engine.
pub trait FormatAdapter: Send + Sync {
    fn format(&self) -> FileFormat;

    /// Split a file into its untouchable wrapper and editable body.
    /// Returns `None` when a required wrapper is missing.
    fn split_document<'a>(&self, text: &'a str) -> Option<Document<'a>> {
        Some(Document::unwrapped(text))
    }

    /// Skeleton used when the primary file does not exist.
    fn empty_document(&self) -> Document<'static> {
        Document::unwrapped("")
    }

    /// Comment placed before an appended entity explaining why it was kept.
    fn reason_comment(&self, prefix: &str) -> String;

    /// Pattern matching `key` at its declaration site within an entity's raw
    /// text. Capture group 1 is the key itself.
    fn key_pattern(&self, key: &str) -> Result<Regex, regex::Error>;

    /// Separator between appended chunks.
    fn line_joiner(&self) -> &'static str {
        "\n"
    }

    /// Whether the format scopes entries with group comments.
    fn has_group_comments(&self) -> bool {
        false
    }

    /// Whether the format wraps its body in a document element.
    fn has_wrapper(&self) -> bool {
        false
    }

    fn parse<'a>(&self, text: &'a str) -> Vec<Record<'a>> {
        parser::parse(self.format(), text)
    }

    /// Whether the record kind belongs to this format's taxonomy.
    fn accepts(&self, record: &Record<'_>) -> bool {
        match record {
            Record::Entity(entity) => entity.format == self.format(),
            Record::GroupComment(_) => self.has_group_comments(),
            Record::Wrapper(_) => self.has_wrapper(),
            Record::Comment(comment) => {
                comment.kind == CommentKind::Note || self.has_group_comments()
            }
            Record::Blank(_) | Record::Junk(_) => true,
        }
    }

    /// Append `suffix` to the declaration of `key` inside `raw`.
    fn rename_key(
        &self,
        filename: &str,
        raw: &str,
        key: &str,
        suffix: &str,
    ) -> CombineResult<String> {
        let pattern = self.key_pattern(key).map_err(|source| CombineError::Pattern {
            filename: filename.to_string(),
            source,
        })?;

        let sites: Vec<_> = pattern
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .collect();
        let [site] = sites.as_slice() else {
            return Err(CombineError::RewriteAmbiguous {
                filename: filename.to_string(),
                key: key.to_string(),
                matches: sites.len(),
            });
        };

        let mut renamed = String::with_capacity(raw.len() + suffix.len());
        renamed.push_str(&raw[..site.end()]);
        renamed.push_str(suffix);
        renamed.push_str(&raw[site.end()..]);
        Ok(renamed)
    }
}

/// Look up the adapter for a format.
pub fn adapter(format: FileFormat) -> &'static dyn FormatAdapter {
    match format {
        FileFormat::Fluent => &FluentFormat,
        FileFormat::Dtd => &DtdFormat,
        FileFormat::AndroidStrings => &AndroidFormat,
        FileFormat::Properties => &PropertiesFormat,
    }
}

/// Look up the adapter for a file name.
pub fn adapter_for(filename: &str) -> CombineResult<&'static dyn FormatAdapter> {
    FileFormat::from_filename(filename)
        .map(adapter)
        .ok_or_else(|| CombineError::UnsupportedFormat {
            filename: filename.to_string(),
        })
}

// ──────────────────────────────────────────────────────────────
// Fluent
// ──────────────────────────────────────────────────────────────

pub struct FluentFormat;

impl FormatAdapter for FluentFormat {
    fn format(&self) -> FileFormat {
        FileFormat::Fluent
    }

    /// Fluent reasons are group comments, so every following entry falls
    /// under their scope.
    fn reason_comment(&self, prefix: &str) -> String {
        format!("\n## {prefix}\n")
    }

    fn key_pattern(&self, key: &str) -> Result<Regex, regex::Error> {
        Regex::new(&format!(r"\A({})[ \t]*=", regex::escape(key)))
    }

    fn has_group_comments(&self) -> bool {
        true
    }
}

// ──────────────────────────────────────────────────────────────
// DTD
// ──────────────────────────────────────────────────────────────

pub struct DtdFormat;

impl FormatAdapter for DtdFormat {
    fn format(&self) -> FileFormat {
        FileFormat::Dtd
    }

    fn reason_comment(&self, prefix: &str) -> String {
        format!("<!-- LOCALIZATION NOTE: {prefix} -->")
    }

    fn key_pattern(&self, key: &str) -> Result<Regex, regex::Error> {
        Regex::new(&format!(r"\A<!ENTITY\s+({})\s", regex::escape(key)))
    }
}

// ──────────────────────────────────────────────────────────────
// Android strings
// ──────────────────────────────────────────────────────────────

pub const ANDROID_PREAMBLE: &str =
    "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\"?>\n<resources>\n";
pub const ANDROID_EPILOGUE: &str = "</resources>\n";

static ROOT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<resources\b[^>]*>").expect("valid root open regex"));
static ROOT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</resources>\s*\z").expect("valid root close regex"));

pub struct AndroidFormat;

impl FormatAdapter for AndroidFormat {
    fn format(&self) -> FileFormat {
        FileFormat::AndroidStrings
    }

    fn split_document<'a>(&self, text: &'a str) -> Option<Document<'a>> {
        let close = ROOT_CLOSE.find(text)?;
        let open = ROOT_OPEN.find(&text[..close.start()])?;
        Some(Document {
            preamble: &text[..open.end()],
            body: &text[open.end()..close.start()],
            epilogue: &text[close.start()..],
        })
    }

    fn empty_document(&self) -> Document<'static> {
        Document {
            preamble: ANDROID_PREAMBLE,
            body: "",
            epilogue: ANDROID_EPILOGUE,
        }
    }

    fn reason_comment(&self, prefix: &str) -> String {
        format!("<!-- {prefix} -->")
    }

    fn key_pattern(&self, key: &str) -> Result<Regex, regex::Error> {
        Regex::new(&format!(
            r#"\A<[A-Za-z][\w.:-]*[^>]*?\sname\s*=\s*["']({})["']"#,
            regex::escape(key)
        ))
    }

    /// Appended elements are nested inside `<resources>`.
    fn line_joiner(&self) -> &'static str {
        "\n    "
    }

    fn has_wrapper(&self) -> bool {
        true
    }
}

// ──────────────────────────────────────────────────────────────
// Properties
// ──────────────────────────────────────────────────────────────

pub struct PropertiesFormat;

impl FormatAdapter for PropertiesFormat {
    fn format(&self) -> FileFormat {
        FileFormat::Properties
    }

    fn reason_comment(&self, prefix: &str) -> String {
        format!("# {prefix}")
    }

    fn key_pattern(&self, key: &str) -> Result<Regex, regex::Error> {
        Regex::new(&format!(r"\A({})[ \t]*[=:]", regex::escape(key)))
    }
}
