mod common;

use common::assert_combined_xml as check;
use l10n_merge_engine::{CombineError, combine_files};

#[test]
fn combine_empty() {
    check(None, None, None);
}

#[test]
fn combine_new_file() {
    let content = r#"
        <string name="string_1">First</string>
        <string name="string_2">Second</string>
        "#;
    check(Some(content), None, Some(content));
}

#[test]
fn combine_removed_file() {
    check(
        None,
        Some(
            r#"
            <string name="string_1">First</string>
            <string name="string_2">Second</string>
            "#,
        ),
        Some(
            r#"

            <!-- REMOVED STRING -->
            <string name="string_1">First</string>
            <!-- REMOVED STRING -->
            <string name="string_2">Second</string>
            "#,
        ),
    );
}

#[test]
fn no_change() {
    let content = r#"
        <string name="string_1">First</string>
        <string name="string_2">Second</string>
        "#;
    check(Some(content), Some(content), Some(content));
}

#[test]
fn added_string() {
    let primary = r#"
        <string name="string_1">First</string>
        <string name="string_new">NEW</string>
        <string name="string_2">Second</string>
        "#;
    check(
        Some(primary),
        Some(
            r#"
            <string name="string_1">First</string>
            <string name="string_2">Second</string>
            "#,
        ),
        Some(primary),
    );
}

#[test]
fn removed_string() {
    check(
        Some(
            r#"
            <string name="string_1">First</string>
            <string name="string_2">Second</string>
            "#,
        ),
        Some(
            r#"
            <string name="string_1">First</string>
            <string name="removed">REMOVED</string>
            <string name="string_2">Second</string>
            "#,
        ),
        Some(
            r#"
            <string name="string_1">First</string>
            <string name="string_2">Second</string>

            <!-- REMOVED STRING -->
            <string name="removed">REMOVED</string>
            "#,
        ),
    );
}

#[test]
fn removed_and_added() {
    check(
        Some(
            r#"
            <string name="new_1">New string</string>
            <string name="string_1">First</string>
            <string name="string_2">Second</string>
            <string name="new_2">New string 2</string>
            "#,
        ),
        Some(
            r#"
            <string name="string_1">First</string>
            <string name="removed_1">First removed</string>
            <string name="removed_2">Second removed</string>
            <string name="string_2">Second</string>
            <string name="removed_3">Third removed</string>
            "#,
        ),
        Some(
            r#"
            <string name="new_1">New string</string>
            <string name="string_1">First</string>
            <string name="string_2">Second</string>
            <string name="new_2">New string 2</string>

            <!-- REMOVED STRING -->
            <string name="removed_1">First removed</string>
            <!-- REMOVED STRING -->
            <string name="removed_2">Second removed</string>
            <!-- REMOVED STRING -->
            <string name="removed_3">Third removed</string>
            "#,
        ),
    );
}

#[test]
fn updated() {
    let new = "<string name=\"changed_string\">NEW</string>\n";
    let old = "<string name=\"changed_string\">OLD</string>\n";
    check(Some(new), Some(old), Some(new));
}

#[test]
fn updated_comment() {
    let new = r#"
        <!-- NEW -->
        <string name="changed_string">string</string>
        "#;
    let old = r#"
        <!-- OLD -->
        <string name="changed_string">string</string>
        "#;
    let bare = "<string name=\"changed_string\">string</string>\n";

    check(Some(new), Some(old), Some(new));
    check(Some(new), Some(bare), Some(new));
    check(Some(bare), Some(old), Some(bare));

    let new = r#"
        <!-- NEW file comment -->

        <!-- NEW -->
        <string name="changed_string">string</string>
        "#;
    let old = r#"
        <!-- OLD file comment -->

        <!-- OLD -->
        <string name="changed_string">string</string>
        "#;
    check(Some(new), Some(old), Some(new));
}

#[test]
fn reordered() {
    let primary = r#"
        <string name="string_1">value</string>
        <string name="moved_string">move</string>
        "#;
    check(
        Some(primary),
        Some(
            r#"
            <string name="moved_string">move</string>
            <string name="string_1">value</string>
            "#,
        ),
        Some(primary),
    );
}

#[test]
fn removed_string_with_comment() {
    check(
        Some(
            r#"
            <!-- Comment for first. -->
            <string name="string_1">First</string>
            <string name="string_2">Second</string>
            "#,
        ),
        Some(
            r#"
            <!-- Comment for first. -->
            <string name="string_1">First</string>
            <!-- Comment for removed. -->
            <string name="removed">REMOVED</string>
            <string name="string_2">Second</string>
            "#,
        ),
        Some(
            r#"
            <!-- Comment for first. -->
            <string name="string_1">First</string>
            <string name="string_2">Second</string>

            <!-- REMOVED STRING -->
            <!-- Comment for removed. -->
            <string name="removed">REMOVED</string>
            "#,
        ),
    );
}

#[test]
fn comments_move_until_blank_line_or_entity() {
    check(
        Some(
            r#"
            <!-- First File comment -->

            <!-- Comment for first. -->
            <!-- Comment 2 for first. -->
            <string name="string_1">First</string>

            <!-- Second -->
            <!-- File comment -->

            <string name="string_2">Second</string>
            "#,
        ),
        Some(
            r#"
            <!-- First File comment -->

            <!-- Comment for first. -->
            <!-- Comment 2 for first. -->
            <string name="string_1">First</string>
            <string name="removed_1">First removed</string>
            <!-- Comment for second removed. -->
            <string name="removed_2">Second removed</string>

            <!-- Removed file comment -->

            <!-- Comment 1 for third removed -->
            <!-- Comment 2 for third removed -->
            <string name="removed_3">Third removed</string>

            <!-- Second -->
            <!-- File comment -->

            <string name="removed_4">Fourth removed</string>
            <string name="string_2">Second</string>
            "#,
        ),
        Some(
            r#"
            <!-- First File comment -->

            <!-- Comment for first. -->
            <!-- Comment 2 for first. -->
            <string name="string_1">First</string>

            <!-- Second -->
            <!-- File comment -->

            <string name="string_2">Second</string>

            <!-- REMOVED STRING -->
            <string name="removed_1">First removed</string>
            <!-- REMOVED STRING -->
            <!-- Comment for second removed. -->
            <string name="removed_2">Second removed</string>
            <!-- REMOVED STRING -->
            <!-- Comment 1 for third removed -->
            <!-- Comment 2 for third removed -->
            <string name="removed_3">Third removed</string>
            <!-- REMOVED STRING -->
            <string name="removed_4">Fourth removed</string>
            "#,
        ),
    );
}

#[test]
fn wrapper_attributes_are_kept() {
    let primary = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources xmlns:tools=\"http://schemas.android.com/tools\">\n    <string name=\"a\">A</string>\n</resources>\n";
    let alternative = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n    <string name=\"b\">B</string>\n</resources>\n";
    let combined = combine_files("strings.xml", Some(primary), Some(alternative), "OLD")
        .unwrap()
        .unwrap();
    assert_eq!(
        combined,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources xmlns:tools=\"http://schemas.android.com/tools\">\n    <string name=\"a\">A</string>\n\n    <!-- OLD -->\n    <string name=\"b\">B</string>\n</resources>\n"
    );
}

#[test]
fn markup_inside_values_moves_verbatim() {
    check(
        Some("<string name=\"a\">A</string>\n"),
        Some(
            r#"
            <string name="a">A</string>
            <string name="b">Press <b>%1$s</b></string>
            "#,
        ),
        Some(
            r#"
            <string name="a">A</string>

            <!-- REMOVED STRING -->
            <string name="b">Press <b>%1$s</b></string>
            "#,
        ),
    );
}

#[test]
fn missing_wrapper_fails() {
    let wrapped = "<resources>\n    <string name=\"a\">A</string>\n</resources>\n";
    let unwrapped = "<string name=\"a\">A</string>\n";

    let err = combine_files("strings.xml", Some(unwrapped), Some(wrapped), "OLD").unwrap_err();
    assert!(matches!(err, CombineError::MissingDocumentWrapper { .. }));

    let err = combine_files("strings.xml", Some(wrapped), Some(unwrapped), "OLD").unwrap_err();
    assert!(matches!(err, CombineError::MissingDocumentWrapper { .. }));
}
