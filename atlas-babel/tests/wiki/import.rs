//! Import tests for wiki markup -> IR

use crate::common::{fixture, heading, kitchensink, para, text};
use atlas_babel::formats::wiki::parser::parse_from_wiki;
use atlas_babel::ir::nodes::{CodeBlock, DocNode, InlineContent, List, Panel, PanelKind};

fn wiki(source: &str) -> Vec<DocNode> {
    parse_from_wiki(source).expect("wiki to parse").children
}

#[test]
fn test_kitchensink() {
    assert_eq!(parse_from_wiki(&fixture("kitchensink.wiki")).unwrap(), kitchensink());
}

#[test]
fn test_empty_input_is_an_empty_document() {
    assert!(wiki("").is_empty());
    assert!(wiki("\n  \n").is_empty());
}

#[test]
fn test_unrecognized_markup_is_plain_text() {
    assert_eq!(
        wiki("h7. not a heading\n{color:red}x{color}"),
        vec![para(vec![
            text("h7. not a heading"),
            InlineContent::HardBreak,
            text("{color:red}x{color}"),
        ])]
    );
}

#[test]
fn test_panel_macros() {
    assert_eq!(
        wiki("{tip}\nGood\n{tip}\n\n{panel:title=Hi}\nPlain\n{panel}"),
        vec![
            DocNode::Panel(Panel {
                kind: PanelKind::Success,
                children: vec![para(vec![text("Good")])],
            }),
            DocNode::Panel(Panel {
                kind: PanelKind::Info,
                children: vec![para(vec![text("Plain")])],
            }),
        ]
    );
}

#[test]
fn test_noformat_and_unclosed_code() {
    assert_eq!(
        wiki("{noformat}\n*raw*\n{noformat}\n\n{code:language=java}\nint x;"),
        vec![
            DocNode::CodeBlock(CodeBlock {
                language: None,
                content: "*raw*".to_string(),
            }),
            DocNode::CodeBlock(CodeBlock {
                language: Some("java".to_string()),
                content: "int x;".to_string(),
            }),
        ]
    );
}

#[test]
fn test_list_kind_change_starts_a_new_list() {
    let blocks = wiki("* a\n# b");
    assert!(matches!(
        &blocks[..],
        [
            DocNode::List(List { ordered: false, .. }),
            DocNode::List(List { ordered: true, .. })
        ]
    ));
}

#[test]
fn test_bq_shorthand_and_heading() {
    let blocks = wiki("h3. Three\nbq. quoted");
    assert_eq!(blocks[0], heading(3, "Three"));
    assert!(matches!(&blocks[1], DocNode::BlockQuote(_)));
}
