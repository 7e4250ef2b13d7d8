//! Export tests for IR -> Markdown

use crate::common::{kitchensink, para, text};
use atlas_babel::formats::markdown::parser::parse_from_markdown;
use atlas_babel::formats::markdown::serializer::serialize_to_markdown;
use atlas_babel::ir::nodes::{CodeBlock, DocNode, Document, InlineContent, Panel, PanelKind};
use insta::assert_snapshot;

fn to_md(children: Vec<DocNode>) -> String {
    serialize_to_markdown(&Document::new(children)).expect("markdown to serialize")
}

#[test]
fn test_bold_paragraph() {
    let out = to_md(vec![para(vec![
        text("Some "),
        InlineContent::Bold(vec![text("bold")]),
        text(" text"),
    ])]);
    assert_snapshot!(out.trim_end(), @"Some **bold** text");
}

#[test]
fn test_code_block_is_fenced_with_language() {
    let out = to_md(vec![DocNode::CodeBlock(CodeBlock {
        language: Some("rust".to_string()),
        content: "let x = 1;".to_string(),
    })]);
    assert!(out.contains("rust"), "language missing from {out:?}");
    assert!(out.contains("let x = 1;"));
    assert!(out.starts_with("```") || out.starts_with("~~~"));
}

#[test]
fn test_panel_becomes_quote() {
    let out = to_md(vec![DocNode::Panel(Panel {
        kind: PanelKind::Warning,
        children: vec![para(vec![text("careful")])],
    })]);
    assert_snapshot!(out.trim_end(), @"> careful");
}

#[test]
fn test_underline_keeps_content() {
    let out = to_md(vec![para(vec![InlineContent::Underline(vec![text(
        "under",
    )])])]);
    assert_snapshot!(out.trim_end(), @"under");
}

#[test]
fn test_kitchensink_reparses_to_the_same_document() {
    let out = serialize_to_markdown(&kitchensink()).unwrap();
    assert_eq!(parse_from_markdown(&out).unwrap(), kitchensink());
}

#[test]
fn test_empty_document() {
    assert_eq!(to_md(vec![]).trim(), "");
}
