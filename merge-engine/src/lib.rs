//! # l10n-merge-engine
//!
//! Combines two versions of a localization file so that translators see the
//! strings of both in a single file.
//!
//! ## Approach
//!
//! 1. **Entity stream parsing**: Each supported format (Fluent, DTD,
//!    Android string resources, properties) is scanned into a flat stream of
//!    records: entities, comments, group comments, blank runs and document
//!    wrappers. Records borrow their exact source text.
//!
//! 2. **Format adapters**: Per-format knowledge about document wrappers,
//!    reason comments and identifier renaming sits behind the
//!    [`FormatAdapter`] trait.
//!
//! 3. **Merging**: The primary version is kept as is. Entities that only
//!    exist in the alternative version are appended at the end with a reason
//!    comment and the comments that preceded them.
//!
//! ## Example
//!
//! ```rust
//! use l10n_merge_engine::combine_files;
//!
//! let combined = combine_files(
//!     "browser.properties",
//!     Some("a = 1\n"),
//!     Some("a = 1\nb = 2\n"),
//!     "Will be unused in Tor Browser 14.5!",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     combined.as_deref(),
//!     Some("a = 1\n\n# Will be unused in Tor Browser 14.5!\nb = 2\n"),
//! );
//! ```

pub mod combine;
pub mod error;
pub mod format;
pub mod parser;
pub mod types;

// Re-export primary public API
pub use combine::{CombineOptions, combine_files, combine_files_with};
pub use error::{CombineError, CombineResult};
pub use format::{FormatAdapter, adapter, adapter_for};
pub use types::{
    Blank, Comment, CommentKind, Document, Entity, FileFormat, GroupComment, Junk, Record,
};
