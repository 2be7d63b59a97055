// src/core/markup.rs
//! Typst markup serialization of assembled blocks
//!
//! Data text is only ever emitted as escaped Typst string literals, so nothing
//! coming from a profile can be read back as markup or code.

use crate::core::blocks::{Block, LabeledField, ReferenceBlock};

// ===== Page geometry =====

/// Page geometry every CV is rendered with: A4 portrait, 20mm margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageGeometry;

impl PageGeometry {
    pub fn a4_portrait() -> Self {
        Self
    }

    /// Page set rule prepended to the document by the Typst renderer.
    pub fn typst_page_rule(&self) -> String {
        "#set page(paper: \"a4\", flipped: false, margin: 20mm)\n".to_string()
    }
}

// ===== Escaping =====

/// Quote `text` as a Typst string literal.
pub fn typst_str(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

// Content block holding one string per visual line.
fn content_lines(lines: &[String]) -> String {
    let body = lines
        .iter()
        .map(|line| format!("#{}", typst_str(line)))
        .collect::<Vec<_>>()
        .join("#linebreak()");
    format!("[{}]", body)
}

fn list(items: &[String]) -> String {
    let items = items
        .iter()
        .map(|item| typst_str(item))
        .collect::<Vec<_>>()
        .join(", ");
    format!("#list({})\n", items)
}

fn field_line(fields: &[LabeledField]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.label, f.value))
        .collect::<Vec<_>>()
        .join(" | ")
}

// ===== Serializer =====

pub struct TypstMarkup;

impl TypstMarkup {
    pub fn render(blocks: &[Block]) -> String {
        let mut markup = String::new();

        markup.push_str("#set text(size: 10pt)\n");
        markup.push_str("#set par(leading: 0.6em)\n\n");

        for block in blocks {
            markup.push_str(&Self::block(block));
        }

        markup
    }

    fn block(block: &Block) -> String {
        match block {
            Block::Header { text } => format!(
                "#block(below: 0.8em, text(size: 20pt, weight: \"bold\", {}))\n",
                typst_str(text)
            ),
            Block::Contact { fields } => {
                let line = fields
                    .iter()
                    .map(|f| f.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("#block(below: 0.6em, {})\n", typst_str(&line))
            }
            Block::Introduction { lines } => {
                format!("#block(below: 0.6em){}\n", content_lines(lines))
            }
            Block::SectionTitle { text } => format!(
                "#block(above: 1.2em, below: 0.6em, text(size: 14pt, weight: \"bold\", {}))\n",
                typst_str(text)
            ),
            Block::EntryRow { label, dates } => format!(
                "#grid(columns: (1fr, auto), text(weight: \"bold\", {}), text(weight: \"bold\", {}))\n",
                typst_str(label),
                typst_str(dates)
            ),
            Block::Role { text } | Block::Qualification { text } => {
                format!("#block(above: 0.4em, below: 0.4em, emph({}))\n", typst_str(text))
            }
            Block::BulletList { items } => list(items),
            Block::Reference { reference } => Self::reference(reference),
            Block::OptionalTitle { text } => format!(
                "#block(above: 1em, text(size: 12pt, weight: \"bold\", {}))\n",
                typst_str(text)
            ),
            Block::OptionalSubtitle { text } => {
                format!("#block(below: 0.4em, emph({}))\n", typst_str(text))
            }
            Block::Subsection {
                title,
                subtitle,
                bullets,
            } => {
                let mut out = format!("#block(above: 0.6em, strong({}))\n", typst_str(title));
                if let Some(subtitle) = subtitle {
                    out.push_str(&format!("#emph({})\n", typst_str(subtitle)));
                }
                out.push_str(&list(bullets));
                out
            }
            Block::Divider => "#line(length: 100%, stroke: 1.5pt)\n".to_string(),
        }
    }

    fn reference(reference: &ReferenceBlock) -> String {
        let lines = match reference {
            ReferenceBlock::Plain { text } => vec![format!("Reference: {}", text)],
            ReferenceBlock::Structured {
                identity,
                contact,
                relationship,
            } => {
                let mut lines = vec!["Reference".to_string()];
                lines.extend(
                    [identity.as_slice(), contact.as_slice(), relationship.as_slice()]
                        .into_iter()
                        .filter(|fields| !fields.is_empty())
                        .map(field_line),
                );
                lines
            }
        };
        format!(
            "#block(below: 0.8em, text(size: 9pt, fill: gray, emph{}))\n",
            content_lines(&lines)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DocumentAssembler;
    use crate::types::{OptionalSection, ProfileRecord, Subsection};

    #[test]
    fn test_typst_str_escapes() {
        assert_eq!(typst_str("plain"), "\"plain\"");
        assert_eq!(typst_str("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(typst_str("a\\b"), "\"a\\\\b\"");
        assert_eq!(typst_str("a\nb"), "\"a\\nb\"");
        assert_eq!(typst_str("#set page(width: 1pt)"), "\"#set page(width: 1pt)\"");
        assert_eq!(typst_str("bell\u{7}"), "\"bell\\u{7}\"");
    }

    #[test]
    fn test_page_rule_for_geometry() {
        assert_eq!(
            PageGeometry::a4_portrait().typst_page_rule(),
            "#set page(paper: \"a4\", flipped: false, margin: 20mm)\n"
        );
        assert_eq!(PageGeometry::default(), PageGeometry::a4_portrait());
    }

    #[test]
    fn test_injected_markup_stays_inside_literals() {
        let record = ProfileRecord {
            first_name: "\"]#set page(width: 1pt)//".to_string(),
            last_name: "Doe".to_string(),
            ..ProfileRecord::default()
        };
        let markup = TypstMarkup::render(&DocumentAssembler::assemble(&record));
        assert!(markup.contains("\"\\\"]#set page(width: 1pt)// Doe\""));
        assert_eq!(markup.matches("#set page").count(), 1);
        assert_eq!(markup.lines().filter(|l| l.starts_with("#set page")).count(), 0);
    }

    #[test]
    fn test_introduction_lines_are_separated_by_linebreaks() {
        let record = ProfileRecord {
            introduction: Some("Line one\nLine two".to_string()),
            ..ProfileRecord::default()
        };
        let markup = TypstMarkup::render(&DocumentAssembler::assemble(&record));
        assert!(markup.contains("[#\"Line one\"#linebreak()#\"Line two\"]"));
    }

    #[test]
    fn test_subsection_renders_empty_list() {
        let record = ProfileRecord {
            optional: vec![OptionalSection::new("Skills").with_subsection(Subsection::new("Frontend"))],
            ..ProfileRecord::default()
        };
        let markup = TypstMarkup::render(&DocumentAssembler::assemble(&record));
        assert!(markup.contains("#block(above: 0.6em, strong(\"Frontend\"))\n#list()\n"));
    }

    #[test]
    fn test_structured_reference_lines() {
        let block = ReferenceBlock::Structured {
            identity: vec![
                LabeledField::new("Name", "Jane"),
                LabeledField::new("Company", "Acme"),
            ],
            contact: vec![],
            relationship: Some(LabeledField::new("Relationship", "Manager")),
        };
        let markup = TypstMarkup::reference(&block);
        assert!(markup.contains(
            "[#\"Reference\"#linebreak()#\"Name: Jane | Company: Acme\"#linebreak()#\"Relationship: Manager\"]"
        ));
    }

    #[test]
    fn test_contact_joins_values() {
        let block = Block::Contact {
            fields: vec![
                LabeledField::new("Address", "1 Main St"),
                LabeledField::new("Telephone", "555"),
                LabeledField::new("Email", "a@b.c"),
            ],
        };
        assert_eq!(
            TypstMarkup::block(&block),
            "#block(below: 0.6em, \"1 Main St, 555, a@b.c\")\n"
        );
    }
}
