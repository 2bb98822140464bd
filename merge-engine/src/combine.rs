//! Combining two versions of a localization file.
//!
//! The primary version is kept verbatim. Entities that only exist in the
//! alternative version are appended after it, each introduced by a reason
//! comment and followed by the comments that preceded it in the alternative
//! file. Fluent files use group comments for the reason, so one reason
//! header covers every entry until the alternative file opens a new group.
//!
//! The alternative file is walked once, front to back. Two pieces of state
//! are carried along the walk:
//! - the stacked comments waiting for the next entity, cleared by an empty
//!   line, a group or resource comment, or an entity that is not appended;
//! - the pending group header, emitted before the next appended Fluent entry.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{CombineError, CombineResult, snippet};
use crate::format::{FormatAdapter, adapter_for};
use crate::types::{CommentKind, Entity, Record};

static SPACE_ONLY_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ +$").expect("valid blank line regex"));

/// Options for [`combine_files_with`].
#[derive(Debug, Clone, Default)]
pub struct CombineOptions {
    /// Keys to take from the alternative file. `None` takes every key the
    /// primary file does not have.
    pub include_keys: Option<HashSet<String>>,
    /// Suffix appended to the identifier of every appended entity.
    pub key_suffix: String,
}

impl CombineOptions {
    pub fn with_include_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_key_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.key_suffix = suffix.into();
        self
    }
}

/// Combine two versions of a localization file into one that includes the
/// strings of both.
///
/// `primary` is presented first. Strings only found in `alternative` are
/// placed at the end, introduced by `reason_prefix`. Either side may be
/// `None` when the file does not exist in that version; the result is `None`
/// only when both are.
pub fn combine_files(
    filename: &str,
    primary: Option<&str>,
    alternative: Option<&str>,
    reason_prefix: &str,
) -> CombineResult<Option<String>> {
    combine_files_with(
        filename,
        primary,
        alternative,
        reason_prefix,
        &CombineOptions::default(),
    )
}

/// [`combine_files`] with an explicit key selection and identifier suffix.
pub fn combine_files_with(
    filename: &str,
    primary: Option<&str>,
    alternative: Option<&str>,
    reason_prefix: &str,
    options: &CombineOptions,
) -> CombineResult<Option<String>> {
    if primary.is_none() && alternative.is_none() {
        return Ok(None);
    }

    let adapter = adapter_for(filename)?;

    let (document, existing_keys) = match primary {
        Some(text) => {
            let document = adapter
                .split_document(text)
                .ok_or_else(|| missing_wrapper(filename))?;
            let records = adapter.parse(text);
            (document, entity_keys(filename, adapter, &records)?)
        }
        None => (adapter.empty_document(), HashSet::new()),
    };

    let records = match alternative {
        Some(text) => {
            if adapter.split_document(text).is_none() {
                return Err(missing_wrapper(filename));
            }
            adapter.parse(text)
        }
        None => Vec::new(),
    };

    let mut merge = Merge::new(filename, adapter, reason_prefix, options, &existing_keys);
    for record in &records {
        merge.push(record)?;
    }
    let appended = merge.finish();

    Ok(Some(document.assemble(&appended)))
}

/// Keys of every entity in a record stream, checking the stream on the way.
fn entity_keys<'a>(
    filename: &str,
    adapter: &dyn FormatAdapter,
    records: &[Record<'a>],
) -> CombineResult<HashSet<&'a str>> {
    let mut keys = HashSet::new();
    for record in records {
        check_record(filename, adapter, record)?;
        if let Record::Entity(entity) = record {
            keys.insert(entity.key);
        }
    }
    Ok(keys)
}

fn check_record(
    filename: &str,
    adapter: &dyn FormatAdapter,
    record: &Record<'_>,
) -> CombineResult<()> {
    if let Record::Junk(junk) = record {
        return Err(CombineError::MalformedInput {
            filename: filename.to_string(),
            offset: junk.offset,
            snippet: snippet(junk.raw),
        });
    }
    if !adapter.accepts(record) {
        return Err(CombineError::UnexpectedRecordType {
            filename: filename.to_string(),
            format: adapter.format(),
            kind: record.kind_name(),
            snippet: snippet(record.raw()),
        });
    }
    Ok(())
}

fn missing_wrapper(filename: &str) -> CombineError {
    CombineError::MissingDocumentWrapper {
        filename: filename.to_string(),
    }
}

/// State of one walk over the alternative record stream.
struct Merge<'a> {
    filename: &'a str,
    adapter: &'a dyn FormatAdapter,
    reason_prefix: &'a str,
    options: &'a CombineOptions,
    existing_keys: &'a HashSet<&'a str>,
    stacked_comments: Vec<&'a str>,
    pending_group: Option<String>,
    additions: Vec<Cow<'a, str>>,
}

impl<'a> Merge<'a> {
    fn new(
        filename: &'a str,
        adapter: &'a dyn FormatAdapter,
        reason_prefix: &'a str,
        options: &'a CombineOptions,
        existing_keys: &'a HashSet<&'a str>,
    ) -> Self {
        // The first appended entry always opens a reason group, which also
        // ends any group left open at the end of the primary file.
        let pending_group = adapter
            .has_group_comments()
            .then(|| adapter.reason_comment(reason_prefix));
        Self {
            filename,
            adapter,
            reason_prefix,
            options,
            existing_keys,
            stacked_comments: Vec::new(),
            pending_group,
            additions: Vec::new(),
        }
    }

    fn push(&mut self, record: &Record<'a>) -> CombineResult<()> {
        check_record(self.filename, self.adapter, record)?;

        match record {
            Record::Blank(blank) => {
                if blank.separates() {
                    self.stacked_comments.clear();
                }
            }
            Record::Comment(comment) => match comment.kind {
                CommentKind::Note => self.stacked_comments.push(comment.raw),
                CommentKind::Resource => self.open_group(Some(comment.raw)),
            },
            Record::GroupComment(group) => {
                self.open_group((!group.is_empty()).then_some(group.raw));
            }
            Record::Entity(entity) => self.push_entity(entity)?,
            Record::Wrapper(_) | Record::Junk(_) => {}
        }
        Ok(())
    }

    /// Replace the pending group header. Fluent resource comments open a
    /// new header just like group comments do.
    fn open_group(&mut self, raw: Option<&'a str>) {
        self.stacked_comments.clear();
        let header = self.adapter.reason_comment(self.reason_prefix);
        self.pending_group = Some(match raw {
            Some(raw) => format!("{header}{raw}\n"),
            None => header,
        });
    }

    fn includes(&self, key: &str) -> bool {
        match &self.options.include_keys {
            Some(keys) => keys.contains(key),
            None => !self.existing_keys.contains(key),
        }
    }

    fn push_entity(&mut self, entity: &Entity<'a>) -> CombineResult<()> {
        if !self.includes(entity.key) {
            // Already in the primary file: its comments go with it.
            self.stacked_comments.clear();
            return Ok(());
        }

        if self.adapter.has_group_comments() {
            if let Some(header) = self.pending_group.take() {
                self.additions.push(Cow::Owned(header));
            }
        } else {
            self.additions
                .push(Cow::Owned(self.adapter.reason_comment(self.reason_prefix)));
        }
        self.additions
            .extend(self.stacked_comments.drain(..).map(Cow::Borrowed));

        let suffix = self.options.key_suffix.as_str();
        if suffix.is_empty() {
            self.additions.push(Cow::Borrowed(entity.raw));
        } else {
            let renamed = self
                .adapter
                .rename_key(self.filename, entity.raw, entity.key, suffix)?;
            self.additions.push(Cow::Owned(renamed));
        }

        debug!(
            filename = self.filename,
            key = entity.key,
            suffix,
            "appending entry from alternative version"
        );
        Ok(())
    }

    /// Render the appended block: one empty line before and after, chunks
    /// joined with the format's separator.
    fn finish(self) -> String {
        if self.additions.is_empty() {
            return String::new();
        }

        let mut parts = Vec::with_capacity(self.additions.len() + 2);
        parts.push(Cow::Borrowed(""));
        parts.extend(self.additions);
        parts.push(Cow::Borrowed(""));

        let joined = parts.join(self.adapter.line_joiner());
        SPACE_ONLY_LINES.replace_all(&joined, "").into_owned()
    }
}
