//! Translation files inside a checked out release branch.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use walkdir::WalkDir;

use crate::release::ReleaseBranch;

/// A translation file found in one release branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFile {
    /// Path relative to the checkout root, with `/` separators.
    pub path: String,
    pub content: String,
}

/// A release branch checked out in a local directory.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub branch: ReleaseBranch,
    pub root: PathBuf,
}

impl Checkout {
    pub fn new(branch: ReleaseBranch, root: impl Into<PathBuf>) -> Self {
        Self {
            branch,
            root: root.into(),
        }
    }

    /// Find the file called `filename` in this checkout.
    ///
    /// When `search_dirs` is given, only files beneath one of those
    /// directories (relative to the root) match. Returns `None` when no file
    /// matches and fails when more than one does.
    pub fn find_file(
        &self,
        filename: &str,
        search_dirs: Option<&[String]>,
    ) -> anyhow::Result<Option<TranslationFile>> {
        let mut matching = Vec::new();
        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git")
        {
            let entry = entry.with_context(|| format!("walking {}", self.root.display()))?;
            if !entry.file_type().is_file() || entry.file_name() != filename {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if search_dirs.is_none_or(|dirs| in_dirs(relative, dirs)) {
                matching.push(relative.to_path_buf());
            }
        }

        let path = match matching.as_slice() {
            [] => return Ok(None),
            [path] => path,
            _ => bail!(
                "multiple occurrences of {filename} in {}: {}",
                self.branch,
                matching
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        let full_path = self.root.join(path);
        let content = std::fs::read_to_string(&full_path)
            .with_context(|| format!("reading {}", full_path.display()))?;
        Ok(Some(TranslationFile {
            path: slash_path(path),
            content,
        }))
    }
}

/// Whether `path` lies beneath one of `dirs`.
fn in_dirs(path: &Path, dirs: &[String]) -> bool {
    dirs.iter()
        .any(|dir| path.starts_with(dir.trim_end_matches('/')))
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
