//! Combining one translation file across release branches.
//!
//! The current branch is presented first. Branding strings from the other
//! release channels follow, then strings only the stable branch still uses,
//! then strings only the legacy branch still uses.

use anyhow::{Context, bail};
use l10n_merge_engine::{CombineOptions, combine_files, combine_files_with};
use tracing::{info, warn};

use crate::checkout::{Checkout, TranslationFile};
use crate::config::FileSpec;
use crate::release::ReleaseBranch;

/// The release branches taking part in a combination. `legacy` is `None`
/// when legacy strings are not wanted.
#[derive(Debug, Clone, Copy)]
pub struct Releases<'a> {
    pub current: &'a ReleaseBranch,
    pub stable: &'a ReleaseBranch,
    pub legacy: Option<&'a ReleaseBranch>,
}

/// Every version of one logical file, as found in each branch.
#[derive(Debug, Clone, Default)]
pub struct FileVersions {
    pub current: Option<TranslationFile>,
    pub stable: Option<TranslationFile>,
    pub legacy: Option<TranslationFile>,
    /// One entry per branding version of the file spec, in the same order,
    /// looked up in the current branch.
    pub branding: Vec<Option<TranslationFile>>,
}

impl FileVersions {
    /// Look up every version of `spec` in the given checkouts.
    pub fn collect(
        spec: &FileSpec,
        current: &Checkout,
        stable: &Checkout,
        legacy: Option<&Checkout>,
    ) -> anyhow::Result<Self> {
        let where_dirs = spec.where_dirs.as_deref();
        let legacy = match legacy {
            Some(checkout) if !spec.exclude_legacy => checkout.find_file(&spec.name, where_dirs)?,
            _ => None,
        };
        let branding = match &spec.branding {
            Some(branding) => branding
                .versions
                .iter()
                .map(|version| current.find_file(&spec.name, version.where_dirs.as_deref()))
                .collect::<anyhow::Result<_>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            current: current.find_file(&spec.name, where_dirs)?,
            stable: stable.find_file(&spec.name, where_dirs)?,
            legacy,
            branding,
        })
    }
}

/// Combine every version of the file described by `spec`.
///
/// Returns `None` when the file exists in none of the versions used.
pub fn combine_versions(
    spec: &FileSpec,
    versions: &FileVersions,
    releases: &Releases<'_>,
) -> anyhow::Result<Option<String>> {
    let name = spec.name.as_str();
    let current = versions.current.as_ref();
    let stable = versions.stable.as_ref();

    match (current, stable) {
        (None, None) => warn!("{name} does not exist in either the current or stable branch"),
        (None, Some(_)) => warn!("{name} deleted in the current branch"),
        (Some(_), None) => warn!("{name} does not exist in the stable branch"),
        (Some(current), Some(stable)) if current.path != stable.path => warn!(
            "{name} has different paths in the current and stable branch. {} : {}",
            current.path, stable.path
        ),
        _ => {}
    }

    let mut content = current.map(|file| file.content.clone());

    if let Some(branding) = &spec.branding {
        for (index, version) in branding.versions.iter().enumerate() {
            let Some(file) = versions.branding.get(index).and_then(Option::as_ref) else {
                bail!(
                    "{name} does not exist in {}",
                    version
                        .where_dirs
                        .as_ref()
                        .map_or_else(|| "any directory".to_string(), |dirs| dirs.join(", "))
                );
            };
            let options = CombineOptions::default()
                .with_include_keys(branding.ids.iter().cloned())
                .with_key_suffix(version.suffix.as_str());
            content = combine_files_with(
                name,
                content.as_deref(),
                Some(&file.content),
                &format!("{} Release.", version.name),
                &options,
            )
            .with_context(|| format!("combining {name} with the {} branding", version.name))?;
        }
    }

    content = combine_files(
        name,
        content.as_deref(),
        stable.map(|file| file.content.as_str()),
        &format!("Will be unused in {}!", releases.current.version_name()),
    )
    .with_context(|| format!("combining {name} with {}", releases.stable))?;

    match releases.legacy {
        Some(legacy_branch) if !spec.exclude_legacy => {
            let legacy = versions.legacy.as_ref();
            match (legacy, current, stable) {
                (Some(_), None, None) => warn!("{name} still exists in the legacy branch"),
                (None, _, _) => warn!("{name} does not exist in the legacy branch"),
                (Some(legacy), _, Some(stable)) if legacy.path != stable.path => warn!(
                    "{name} has different paths in the stable and legacy branch. {} : {}",
                    stable.path, legacy.path
                ),
                (Some(legacy), Some(current), _) if legacy.path != current.path => warn!(
                    "{name} has different paths in the current and legacy branch. {} : {}",
                    current.path, legacy.path
                ),
                _ => {}
            }

            content = combine_files(
                name,
                content.as_deref(),
                legacy.map(|file| file.content.as_str()),
                &format!("Unused in {}!", releases.stable.version_name()),
            )
            .with_context(|| format!("combining {name} with {legacy_branch}"))?;
        }
        Some(_) => info!("Excluding legacy branch for {name}"),
        None => {}
    }

    Ok(content)
}
