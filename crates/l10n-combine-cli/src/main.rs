use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use l10n_combine_core::checkout::Checkout;
use l10n_combine_core::config::FilesConfig;
use l10n_combine_core::logging::init_logging;
use l10n_combine_core::orchestrator::{FileVersions, Releases, combine_versions};
use l10n_combine_core::release::ReleaseBranch;
use l10n_merge_engine::{CombineOptions, combine_files_with};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "l10n-combine",
    about = "Combine translation files across release versions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for a log file, in addition to stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine two versions of a single translation file
    Combine(CombineArgs),
    /// Combine every configured file across the current, stable and legacy branches
    Versions(VersionsArgs),
}

#[derive(Args)]
struct CombineArgs {
    /// Name of the file, used to pick the format (e.g. browser.ftl)
    filename: String,
    /// Version presented first
    #[arg(long)]
    primary: Option<PathBuf>,
    /// Version whose unique strings are appended
    #[arg(long)]
    alternative: Option<PathBuf>,
    /// Reason placed before appended strings
    #[arg(long)]
    reason: String,
    /// Only take these keys from the alternative version
    #[arg(long = "include-key")]
    include_keys: Vec<String>,
    /// Suffix appended to the identifier of every appended string
    #[arg(long, default_value = "")]
    suffix: String,
    /// Write the result here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct VersionsArgs {
    /// JSON list of the translation files
    #[arg(long)]
    config: PathBuf,
    /// Branch name of the newest version
    #[arg(long)]
    current_branch: String,
    /// Checkout of the current branch
    #[arg(long)]
    current: PathBuf,
    /// Branch name of the stable release
    #[arg(long)]
    stable_branch: String,
    /// Checkout of the stable branch
    #[arg(long)]
    stable: PathBuf,
    /// Branch name of the legacy release
    #[arg(long, requires = "legacy")]
    legacy_branch: Option<String>,
    /// Checkout of the legacy branch
    #[arg(long, requires = "legacy_branch")]
    legacy: Option<PathBuf>,
    /// Include strings from the legacy branch
    #[arg(long, env = "TRANSLATION_INCLUDE_LEGACY")]
    include_legacy: bool,
    /// Directory the combined files are written to
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_dir.as_deref())?;

    match &cli.command {
        Commands::Combine(args) => cmd_combine(args),
        Commands::Versions(args) => cmd_versions(args),
    }
}

fn read_optional(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    path.map(|path| {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    })
    .transpose()
}

fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

fn cmd_combine(args: &CombineArgs) -> anyhow::Result<()> {
    let primary = read_optional(args.primary.as_deref())?;
    let alternative = read_optional(args.alternative.as_deref())?;

    let mut options = CombineOptions::default().with_key_suffix(args.suffix.as_str());
    if !args.include_keys.is_empty() {
        options = options.with_include_keys(args.include_keys.iter().cloned());
    }

    let combined = combine_files_with(
        &args.filename,
        primary.as_deref(),
        alternative.as_deref(),
        &args.reason,
        &options,
    )?;

    let Some(content) = combined else {
        tracing::info!("{} does not exist in either version", args.filename);
        return Ok(());
    };
    match &args.output {
        Some(path) => write_output(path, &content),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

fn cmd_versions(args: &VersionsArgs) -> anyhow::Result<()> {
    let config = FilesConfig::load(&args.config)?;

    let current = Checkout::new(ReleaseBranch::parse(&args.current_branch)?, &args.current);
    let stable = Checkout::new(ReleaseBranch::parse(&args.stable_branch)?, &args.stable);
    check_release(&current.branch, &stable.branch, &[0, 1], "stable");

    let legacy = match (&args.legacy_branch, &args.legacy) {
        (Some(branch), Some(root)) if args.include_legacy => {
            let checkout = Checkout::new(ReleaseBranch::parse(branch)?, root);
            check_release(&current.branch, &checkout.branch, &[1, 2], "legacy");
            Some(checkout)
        }
        (Some(branch), _) => {
            tracing::info!("Not including the legacy branch {branch}");
            None
        }
        _ => None,
    };

    let releases = Releases {
        current: &current.branch,
        stable: &stable.branch,
        legacy: legacy.as_ref().map(|checkout| &checkout.branch),
    };
    tracing::info!(
        current = %current.branch,
        stable = %stable.branch,
        legacy = ?releases.legacy.map(|branch| branch.name.as_str()),
        "Combining {} files",
        config.files.len()
    );

    for spec in &config.files {
        let versions = FileVersions::collect(spec, &current, &stable, legacy.as_ref())
            .with_context(|| format!("looking up {}", spec.name))?;
        let Some(content) = combine_versions(spec, &versions, &releases)? else {
            continue;
        };
        let path = args.out_dir.join(&spec.directory).join(&spec.name);
        write_output(&path, &content)?;
        tracing::info!("Wrote {}", path.display());
    }

    Ok(())
}

/// Warn when `other` is not the expected number of half releases behind
/// the current branch.
fn check_release(current: &ReleaseBranch, other: &ReleaseBranch, steps: &[u32], role: &str) {
    if other.prefix != current.prefix {
        tracing::warn!("{role} branch {other} is not a {} branch", current.prefix);
    } else if other > current {
        tracing::warn!("{role} branch {other} is newer than {current}");
    } else if !steps.iter().any(|steps| current.is_release_below(other, *steps)) {
        tracing::warn!(
            "{role} branch {other} is not a recent release before {}",
            current.version_name()
        );
    }
}
