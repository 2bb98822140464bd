use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// The list of translation files to combine across release branches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesConfig {
    #[serde(default)]
    pub files: Vec<FileSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileSpec {
    /// Base name of the file, e.g. `browser.ftl`.
    pub name: String,
    /// Directories to restrict the search to. `None` searches everywhere.
    #[serde(default, rename = "where")]
    pub where_dirs: Option<Vec<String>>,
    /// Output directory relative to the translation root. Empty places the
    /// file directly beneath it.
    #[serde(default)]
    pub directory: String,
    /// Branch of the translation repository the file belongs to.
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, rename = "exclude-legacy")]
    pub exclude_legacy: bool,
    #[serde(default)]
    pub branding: Option<Branding>,
}

/// Strings that differ per release channel, copied from the other channels'
/// branding directories with a suffix on their identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct Branding {
    pub ids: Vec<String>,
    #[serde(default)]
    pub versions: Vec<BrandingVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandingVersion {
    /// Channel name used in the reason comment, e.g. `Alpha`.
    pub name: String,
    pub suffix: String,
    #[serde(default, rename = "where")]
    pub where_dirs: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FilesDocument {
    Object(FilesConfig),
    List(Vec<FileSpec>),
}

impl FilesConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse either `{ "files": [...] }` or a bare array of file entries.
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config = match serde_json::from_str(content)? {
            FilesDocument::Object(config) => config,
            FilesDocument::List(files) => FilesConfig { files },
        };
        Ok(config)
    }
}
