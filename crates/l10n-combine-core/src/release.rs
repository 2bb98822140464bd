//! Release branch names.
//!
//! Branches are named `<prefix>-<firefox>esr-<browser>-<n>`, for example
//! `tor-browser-128.3.0esr-14.5-1`. Browser versions advance in steps of
//! `0.5`, so two releases can be compared by counting those steps.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use anyhow::{Context, bail};
use regex::Regex;

static BRANCH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<prefix>[a-z]+\-browser)\-(?P<firefox>[0-9]+(?:\.[0-9]+){1,2})esr\-(?P<browser>[0-9]+\.[05])\-(?P<number>[0-9]+)$",
    )
    .expect("valid branch name regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBranch {
    pub name: String,
    /// e.g. `tor-browser`.
    pub prefix: String,
    /// e.g. `14.5`.
    pub browser_version: String,
    firefox: [u32; 3],
    browser: [u32; 2],
    number: u32,
}

impl ReleaseBranch {
    pub fn parse(name: &str) -> anyhow::Result<Self> {
        let Some(caps) = BRANCH_NAME.captures(name) else {
            bail!("unable to parse the version from the branch {name}");
        };

        let mut firefox = [0; 3];
        for (slot, part) in firefox.iter_mut().zip(caps["firefox"].split('.')) {
            *slot = part
                .parse()
                .with_context(|| format!("firefox version in {name}"))?;
        }
        let (major, minor) = caps["browser"]
            .split_once('.')
            .with_context(|| format!("browser version in {name}"))?;
        let browser = [
            major.parse().with_context(|| format!("browser version in {name}"))?,
            minor.parse().with_context(|| format!("browser version in {name}"))?,
        ];
        let number = caps["number"]
            .parse()
            .with_context(|| format!("branch number in {name}"))?;

        Ok(Self {
            name: name.to_string(),
            prefix: caps["prefix"].to_string(),
            browser_version: caps["browser"].to_string(),
            firefox,
            browser,
            number,
        })
    }

    /// Human readable version, e.g. `Tor Browser 14.5`.
    pub fn version_name(&self) -> String {
        let product = self
            .prefix
            .split('-')
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{product} {}", self.browser_version)
    }

    /// Whether `other` is exactly `steps` half releases behind this branch.
    pub fn is_release_below(&self, other: &ReleaseBranch, steps: u32) -> bool {
        self.half_releases().checked_sub(steps) == Some(other.half_releases())
    }

    /// The browser version counted in steps of `0.5`.
    fn half_releases(&self) -> u32 {
        self.browser[0] * 2 + self.browser[1] / 5
    }

    fn ordering_key(&self) -> ([u32; 3], [u32; 2], u32) {
        (self.firefox, self.browser, self.number)
    }
}

impl Ord for ReleaseBranch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordering_key()
            .cmp(&other.ordering_key())
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for ReleaseBranch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
