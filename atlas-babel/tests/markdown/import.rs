//! Import tests for Markdown -> IR

use crate::common::{fixture, heading, kitchensink, para, text};
use atlas_babel::formats::markdown::parser::parse_from_markdown;
use atlas_babel::ir::nodes::{DocNode, Document, InlineContent, List};

fn md(source: &str) -> Document {
    parse_from_markdown(source).expect("markdown to parse")
}

#[test]
fn test_kitchensink() {
    assert_eq!(md(&fixture("kitchensink.md")), kitchensink());
}

#[test]
fn test_empty_input_is_an_empty_document() {
    assert!(md("").is_empty());
    assert!(md("\n\n   \n").is_empty());
}

#[test]
fn test_setext_heading() {
    let doc = md("Title\n=====\n");
    assert_eq!(doc.children, vec![heading(1, "Title")]);
}

#[test]
fn test_soft_break_becomes_space() {
    let doc = md("one\ntwo\n");
    assert_eq!(doc.children, vec![para(vec![text("one two")])]);
}

#[test]
fn test_underscore_emphasis() {
    let doc = md("__strong__ and _em_\n");
    assert_eq!(
        doc.children,
        vec![para(vec![
            InlineContent::Bold(vec![text("strong")]),
            text(" and "),
            InlineContent::Italic(vec![text("em")]),
        ])]
    );
}

#[test]
fn test_ordered_list_keeps_start() {
    let doc = md("3. three\n4. four\n");
    match &doc.children[..] {
        [DocNode::List(List {
            ordered: true,
            start: 3,
            items,
        })] => assert_eq!(items.len(), 2),
        other => panic!("expected an ordered list, got {other:?}"),
    }
}

#[test]
fn test_indented_code_block() {
    let doc = md("    let x = 1;\n");
    match &doc.children[..] {
        [DocNode::CodeBlock(code)] => {
            assert_eq!(code.language, None);
            assert_eq!(code.content, "let x = 1;");
        }
        other => panic!("expected a code block, got {other:?}"),
    }
}
