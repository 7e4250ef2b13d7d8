//! Cross-format conversion tests
//!
//! Documents built only from constructs every format can express must survive any
//! A -> B -> A trip unchanged at the IR level.

use crate::common::{kitchensink, para, text};
use atlas_babel::ir::nodes::{DocNode, Document};
use atlas_babel::{convert, ConvertOptions, FormatId};
use proptest::prelude::*;

fn through(doc: &Document, via: FormatId) -> Document {
    let encoded = via.encode(doc).expect("encode");
    let text = encoded
        .into_text(Default::default())
        .expect("render encoded output");
    via.parse(&text).expect("reparse")
}

#[test]
fn test_kitchensink_survives_every_format() {
    for format in FormatId::ALL {
        assert_eq!(through(&kitchensink(), format), kitchensink(), "via {format}");
    }
}

#[test]
fn test_kitchensink_survives_every_pair() {
    for from in FormatId::ALL {
        for to in FormatId::ALL {
            let doc = through(&through(&kitchensink(), from), to);
            assert_eq!(doc, kitchensink(), "{from} -> {to}");
        }
    }
}

#[test]
fn test_identity_conversion_is_stable() {
    let options = ConvertOptions::default();
    for format in FormatId::ALL {
        let source = format
            .encode(&kitchensink())
            .unwrap()
            .into_text(Default::default())
            .unwrap();
        let once = convert(&source, format, format, &options).unwrap();
        let twice = convert(&once, format, format, &options).unwrap();
        assert_eq!(once, twice, "{format}");
    }
}

#[test]
fn test_empty_document_crosses_every_format() {
    for format in FormatId::ALL {
        assert!(through(&Document::default(), format).is_empty(), "{format}");
    }
}

fn paragraph_doc(s: &str) -> Document {
    Document::new(vec![para(vec![text(s)])])
}

fn single_text(doc: &Document) -> Option<&str> {
    match &doc.children[..] {
        [DocNode::Paragraph(p)] => match &p.content[..] {
            [atlas_babel::ir::nodes::InlineContent::Text(s)] => Some(s),
            _ => None,
        },
        _ => None,
    }
}

proptest! {
    #[test]
    fn wiki_preserves_text_with_markup_characters(
        s in "[a-z0-9*_+^~!|#{}\\[\\]-][a-z0-9 *_+^~!|#{}\\[\\]-]{0,30}[a-z0-9*_+^~!|#{}\\[\\]-]"
    ) {
        let doc = through(&paragraph_doc(&s), FormatId::Wiki);
        prop_assert_eq!(single_text(&doc), Some(s.as_str()));
    }

    #[test]
    fn markdown_preserves_plain_prose(s in "[a-zA-Z][a-zA-Z0-9 ,]{0,40}[a-zA-Z0-9]") {
        let doc = through(&paragraph_doc(&s), FormatId::Markdown);
        prop_assert_eq!(single_text(&doc), Some(s.as_str()));
    }

    #[test]
    fn adf_preserves_any_text(s in "\\PC{1,40}") {
        let doc = through(&paragraph_doc(&s), FormatId::Adf);
        prop_assert_eq!(single_text(&doc), Some(s.as_str()));
    }
}
