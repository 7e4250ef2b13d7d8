//! Serde model of the Atlassian Document Format subset we read and write.
//!
//! Nodes and marks are internally tagged on `type`. Node and mark types outside the
//! subset deserialize to `Unsupported` so that one unknown extension node does not
//! reject a whole document.

use serde::{Deserialize, Serialize};

pub const ADF_VERSION: u32 = 1;

fn default_version() -> u32 {
    ADF_VERSION
}

fn default_order() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfNode {
    Doc {
        #[serde(default = "default_version")]
        version: u32,
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Paragraph {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    BulletList {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    OrderedList {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<OrderedListAttrs>,
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    ListItem {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<CodeBlockAttrs>,
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Blockquote {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Panel {
        attrs: PanelAttrs,
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Rule,
    Table {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    TableRow {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    TableHeader {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    TableCell {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    MediaSingle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<MediaSingleAttrs>,
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Media {
        attrs: MediaAttrs,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    #[serde(default = "default_order")]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelAttrs {
    pub panel_type: PanelType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
    Info,
    Note,
    Warning,
    Success,
    Error,
    #[serde(other)]
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSingleAttrs {
    pub layout: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAttrs {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Strike,
    Underline,
    Link { attrs: LinkAttrs },
    Subsup { attrs: SubSupAttrs },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSupAttrs {
    #[serde(rename = "type")]
    pub kind: SubSupKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubSupKind {
    Sub,
    Sup,
}
