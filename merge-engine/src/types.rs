//! Core types for the merge engine.
//!
//! A localization file is read as a flat stream of records. Every record
//! borrows its text from the parsed source, so re-emitting a record always
//! reproduces the original bytes.

use std::fmt;
use std::path::Path;

/// Localization file formats understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Project Fluent (`.ftl`).
    Fluent,
    /// XML DTD entity declarations (`.dtd`).
    Dtd,
    /// Android string resources (`strings.xml`).
    AndroidStrings,
    /// Java-style properties (`.properties`).
    Properties,
}

impl FileFormat {
    /// Infer the format from a file name or path.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Infer the format from a file extension (without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ftl" => Some(FileFormat::Fluent),
            "dtd" => Some(FileFormat::Dtd),
            "xml" => Some(FileFormat::AndroidStrings),
            "properties" => Some(FileFormat::Properties),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Fluent => "fluent",
            FileFormat::Dtd => "dtd",
            FileFormat::AndroidStrings => "android",
            FileFormat::Properties => "properties",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One localizable string definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity<'a> {
    pub format: FileFormat,
    /// Identifier of the entity, unique within its file.
    pub key: &'a str,
    /// The full declaration as written in the source.
    pub raw: &'a str,
}

/// How a non-group comment relates to the entries that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// Stacks onto the next entity unless a blank line intervenes.
    Note,
    /// File level comment (Fluent `###`). Never attaches to an entity.
    Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment<'a> {
    pub kind: CommentKind,
    pub raw: &'a str,
}

/// A Fluent group comment (`##`), scoping every following entry until the
/// next group comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupComment<'a> {
    pub raw: &'a str,
}

impl GroupComment<'_> {
    /// A bare `##` closes the previous scope without opening a new one.
    pub fn is_empty(&self) -> bool {
        self.raw == "##"
    }
}

/// A run of whitespace between other records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blank<'a> {
    pub raw: &'a str,
}

impl Blank<'_> {
    pub fn line_breaks(&self) -> usize {
        self.raw.matches('\n').count()
    }

    /// Whether this run contains at least one empty line, which detaches
    /// preceding comments from whatever follows.
    pub fn separates(&self) -> bool {
        self.line_breaks() > 1
    }
}

/// A span the parser could not make sense of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Junk<'a> {
    /// Byte offset of the span within the parsed text.
    pub offset: usize,
    pub raw: &'a str,
}

/// A single parsed element of a localization file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    Comment(Comment<'a>),
    GroupComment(GroupComment<'a>),
    Blank(Blank<'a>),
    /// Document preamble or epilogue (Android `<resources>` wrapper).
    Wrapper(&'a str),
    Entity(Entity<'a>),
    Junk(Junk<'a>),
}

impl<'a> Record<'a> {
    pub fn raw(&self) -> &'a str {
        match self {
            Record::Comment(c) => c.raw,
            Record::GroupComment(g) => g.raw,
            Record::Blank(b) => b.raw,
            Record::Wrapper(raw) => raw,
            Record::Entity(e) => e.raw,
            Record::Junk(j) => j.raw,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Record::Comment(_) => "comment",
            Record::GroupComment(_) => "group comment",
            Record::Blank(_) => "blank",
            Record::Wrapper(_) => "document wrapper",
            Record::Entity(_) => "entity",
            Record::Junk(_) => "junk",
        }
    }

    pub fn as_entity(&self) -> Option<&Entity<'a>> {
        match self {
            Record::Entity(e) => Some(e),
            _ => None,
        }
    }
}

/// A file split into the part that must stay untouched at the start, the
/// editable body, and the part that must stay untouched at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    pub preamble: &'a str,
    pub body: &'a str,
    pub epilogue: &'a str,
}

impl<'a> Document<'a> {
    /// A document without any wrapper.
    pub fn unwrapped(body: &'a str) -> Self {
        Self {
            preamble: "",
            body,
            epilogue: "",
        }
    }

    /// Reassemble the document with `appended` placed after the body.
    pub fn assemble(&self, appended: &str) -> String {
        let mut out = String::with_capacity(
            self.preamble.len() + self.body.len() + appended.len() + self.epilogue.len(),
        );
        out.push_str(self.preamble);
        out.push_str(self.body);
        out.push_str(appended);
        out.push_str(self.epilogue);
        out
    }
}

/// Concatenate the raw text of a record stream.
#[cfg(test)]
pub(crate) fn records_to_source(records: &[Record<'_>]) -> String {
    records.iter().map(Record::raw).collect()
}
