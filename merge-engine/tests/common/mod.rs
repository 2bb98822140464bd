//! Shared helpers for combine tests.

#![allow(dead_code)]

use l10n_merge_engine::combine_files;
use pretty_assertions::assert_eq;

pub const REASON: &str = "REMOVED STRING";

/// Strip the common indentation of an indented test literal.
///
/// A single leading line break is dropped so literals can start on their own
/// line. Whitespace-only lines become empty.
pub fn dedent(text: &str) -> String {
    let text = text.strip_prefix('\n').unwrap_or(text);
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap dedented `<resources>` children in an Android strings document.
pub fn wrap_in_xml(content: &str) -> String {
    let indented: String = dedent(content)
        .split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("    {line}")
            }
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\"?>\n<resources>\n{indented}</resources>\n"
    )
}

/// Combine dedented literals as `filename` and compare with `expect`.
pub fn assert_combined(
    filename: &str,
    primary: Option<&str>,
    alternative: Option<&str>,
    expect: Option<&str>,
) {
    let primary = primary.map(dedent);
    let alternative = alternative.map(dedent);
    let expect = expect.map(dedent);
    let combined = combine_files(
        filename,
        primary.as_deref(),
        alternative.as_deref(),
        REASON,
    )
    .expect("combine should succeed");
    assert_eq!(combined, expect);
}

/// Like [`assert_combined`], wrapping every side in an Android document.
pub fn assert_combined_xml(
    primary: Option<&str>,
    alternative: Option<&str>,
    expect: Option<&str>,
) {
    let primary = primary.map(wrap_in_xml);
    let alternative = alternative.map(wrap_in_xml);
    let expect = expect.map(wrap_in_xml);
    let combined = combine_files(
        "test_strings.xml",
        primary.as_deref(),
        alternative.as_deref(),
        REASON,
    )
    .expect("combine should succeed");
    assert_eq!(combined, expect);
}
