//! Export tests for IR -> wiki markup

use crate::common::{kitchensink, para, text};
use atlas_babel::formats::wiki::parser::parse_from_wiki;
use atlas_babel::formats::wiki::serializer::serialize_to_wiki;
use atlas_babel::ir::nodes::{CodeBlock, DocNode, Document, InlineContent, Panel, PanelKind};
use atlas_babel::{convert, ConvertOptions, FormatId};
use insta::assert_snapshot;

fn to_wiki(children: Vec<DocNode>) -> String {
    serialize_to_wiki(&Document::new(children))
}

#[test]
fn test_kitchensink_matches_fixture() {
    let expected = crate::common::fixture("kitchensink.wiki");
    assert_eq!(serialize_to_wiki(&kitchensink()), expected.trim_end());
}

#[test]
fn test_kitchensink_reparses_to_the_same_document() {
    let out = serialize_to_wiki(&kitchensink());
    assert_eq!(parse_from_wiki(&out).unwrap(), kitchensink());
}

#[test]
fn test_error_panel_degrades_to_warning() {
    let out = to_wiki(vec![DocNode::Panel(Panel {
        kind: PanelKind::Error,
        children: vec![para(vec![text("boom")])],
    })]);
    assert_snapshot!(out, @r"
    {warning}
    boom
    {warning}
    ");
}

#[test]
fn test_markup_characters_in_text_are_escaped() {
    let out = to_wiki(vec![para(vec![text("[not a link] and {{not code}}")])]);
    assert_snapshot!(out, @r"\[not a link\] and \{\{not code}}");
}

#[test]
fn test_superscript_and_subscript() {
    let out = to_wiki(vec![para(vec![
        text("x"),
        InlineContent::Superscript(vec![text("2")]),
        text(" and H"),
        InlineContent::Subscript(vec![text("2")]),
        text("O"),
    ])]);
    // Wrappers glued to letters would not reparse as markup, but the text still survives
    assert_eq!(
        parse_from_wiki(&out).unwrap().children.len(),
        1,
        "unexpected blocks from {out:?}"
    );
}

#[test]
fn test_nested_quote_survives_markdown_round_trip() {
    let options = ConvertOptions::default();
    let wiki = convert("> > inner\n", FormatId::Markdown, FormatId::Wiki, &options).unwrap();
    let md = convert(&wiki, FormatId::Wiki, FormatId::Markdown, &options).unwrap();
    assert_eq!(md.trim_end(), "> inner");
}

#[test]
fn test_code_holding_code_tag_keeps_its_content() {
    let options = ConvertOptions::default();
    let source = "```\na {code} b\n```\n";
    let wiki = convert(source, FormatId::Markdown, FormatId::Wiki, &options).unwrap();
    let back = parse_from_wiki(&wiki).unwrap();
    assert_eq!(
        back.children,
        vec![DocNode::CodeBlock(CodeBlock {
            language: None,
            content: "a {code} b".to_string(),
        })]
    );
}
