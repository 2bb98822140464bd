//! Error types for combining localization files.

use thiserror::Error;

use crate::types::FileFormat;

/// Errors raised while combining two versions of a localization file.
///
/// Every error is fatal for the file being combined. No partial output is
/// ever produced.
#[derive(Debug, Error)]
pub enum CombineError {
    /// The file name does not map to a known localization format.
    #[error("{filename}: unsupported localization file format")]
    UnsupportedFormat { filename: String },

    /// The parser found a span it could not read.
    #[error("{filename}: unexpected junk at byte {offset}: {snippet:?}")]
    MalformedInput {
        filename: String,
        offset: usize,
        snippet: String,
    },

    /// An Android resource file without its `<resources>` element.
    #[error("{filename}: missing a final </resources>")]
    MissingDocumentWrapper { filename: String },

    /// Renaming an identifier did not find exactly one declaration site.
    #[error("{filename}: renaming `{key}` matched {matches} sites, expected exactly one")]
    RewriteAmbiguous {
        filename: String,
        key: String,
        matches: usize,
    },

    /// A record kind the format never produces.
    #[error("{filename}: unexpected {kind} in {format} file: {snippet:?}")]
    UnexpectedRecordType {
        filename: String,
        format: FileFormat,
        kind: &'static str,
        snippet: String,
    },

    /// An identifier pattern failed to compile.
    #[error("{filename}: invalid identifier pattern: {source}")]
    Pattern {
        filename: String,
        #[source]
        source: regex::Error,
    },
}

impl CombineError {
    /// Name of the file whose combination failed.
    pub fn filename(&self) -> &str {
        match self {
            CombineError::UnsupportedFormat { filename }
            | CombineError::MalformedInput { filename, .. }
            | CombineError::MissingDocumentWrapper { filename }
            | CombineError::RewriteAmbiguous { filename, .. }
            | CombineError::UnexpectedRecordType { filename, .. }
            | CombineError::Pattern { filename, .. } => filename,
        }
    }
}

/// Result type for combine operations.
pub type CombineResult<T> = Result<T, CombineError>;

/// Shorten a source span for error messages.
pub(crate) fn snippet(raw: &str) -> String {
    const MAX_CHARS: usize = 60;
    let mut out: String = raw.chars().take(MAX_CHARS).collect();
    if raw.chars().count() > MAX_CHARS {
        out.push_str("...");
    }
    out
}
