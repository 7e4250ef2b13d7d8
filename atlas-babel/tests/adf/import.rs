//! Import tests for ADF -> IR

use crate::common::{fixture, kitchensink, para, text};
use atlas_babel::formats::adf::parser::parse_from_adf;
use atlas_babel::ir::nodes::{DocNode, InlineContent, Link, Panel, PanelKind};
use atlas_babel::FormatError;
use serde_json::json;

fn adf(value: serde_json::Value) -> Vec<DocNode> {
    parse_from_adf(&value.to_string())
        .expect("adf to parse")
        .children
}

#[test]
fn test_kitchensink() {
    assert_eq!(parse_from_adf(&fixture("kitchensink.json")).unwrap(), kitchensink());
}

#[test]
fn test_empty_input_is_a_parse_error() {
    let err = parse_from_adf("").unwrap_err();
    assert!(matches!(err, FormatError::Parse { format: "adf", .. }));
}

#[test]
fn test_non_doc_root_is_rejected() {
    let err = parse_from_adf(r#"{"type":"paragraph","content":[]}"#).unwrap_err();
    assert!(err.to_string().contains("paragraph"), "{err}");
}

#[test]
fn test_empty_doc() {
    assert!(adf(json!({"type": "doc", "version": 1, "content": []})).is_empty());
}

#[test]
fn test_panels_keep_their_kind() {
    let doc = adf(json!({
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "panel", "attrs": {"panelType": "error"}, "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "boom"}]}
            ]},
            {"type": "panel", "attrs": {"panelType": "custom"}, "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "own"}]}
            ]}
        ]
    }));
    assert_eq!(
        doc,
        vec![
            DocNode::Panel(Panel {
                kind: PanelKind::Error,
                children: vec![para(vec![text("boom")])],
            }),
            DocNode::Panel(Panel {
                kind: PanelKind::Info,
                children: vec![para(vec![text("own")])],
            }),
        ]
    );
}

#[test]
fn test_unknown_nodes_and_marks_are_skipped() {
    let doc = adf(json!({
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "extension", "attrs": {"extensionKey": "x"}},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "red", "marks": [{"type": "textColor", "attrs": {"color": "#f00"}}]},
                {"type": "emoji", "attrs": {"shortName": ":smile:"}}
            ]}
        ]
    }));
    assert_eq!(doc, vec![para(vec![text("red")])]);
}

#[test]
fn test_nested_marks_wrap_in_order() {
    let doc = adf(json!({
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "paragraph", "content": [
                {"type": "text", "text": "x", "marks": [
                    {"type": "link", "attrs": {"href": "https://example.com"}},
                    {"type": "strong"}
                ]}
            ]}
        ]
    }));
    assert_eq!(
        doc,
        vec![para(vec![InlineContent::Link(Link {
            href: "https://example.com".to_string(),
            content: vec![InlineContent::Bold(vec![text("x")])],
        })])]
    );
}
