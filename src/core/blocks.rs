// src/core/blocks.rs
//! Typed layout blocks produced by the assembler and consumed by the markup serializer

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

impl LabeledField {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: String,
    },
    Contact {
        fields: Vec<LabeledField>,
    },
    /// One entry per visual line.
    Introduction {
        lines: Vec<String>,
    },
    SectionTitle {
        text: String,
    },
    /// Company or institution on the left, date range on the right.
    EntryRow {
        label: String,
        dates: String,
    },
    Role {
        text: String,
    },
    Qualification {
        text: String,
    },
    BulletList {
        items: Vec<String>,
    },
    Reference {
        reference: ReferenceBlock,
    },
    OptionalTitle {
        text: String,
    },
    OptionalSubtitle {
        text: String,
    },
    /// Bullets are always kept, an empty list is still a list.
    Subsection {
        title: String,
        subtitle: Option<String>,
        bullets: Vec<String>,
    },
    Divider,
}

impl Block {
    pub fn is_divider(&self) -> bool {
        matches!(self, Block::Divider)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceBlock {
    Plain {
        text: String,
    },
    /// Lines with no populated field are left empty and skipped when rendered.
    Structured {
        identity: Vec<LabeledField>,
        contact: Vec<LabeledField>,
        relationship: Option<LabeledField>,
    },
}
