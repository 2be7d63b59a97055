// src/core/assembler.rs
//! Maps a profile record onto the ordered block sequence of the document

use crate::core::blocks::{Block, LabeledField, ReferenceBlock};
use crate::types::{
    EducationEntry, ExperienceEntry, OptionalSection, ProfileRecord, Reference,
    StructuredReference,
};

pub const EXPERIENCE_TITLE: &str = "Professional experience";
pub const EDUCATION_TITLE: &str = "Education";

pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Pure and total: the same record always yields the same blocks, in
    /// record order, and missing data only ever removes dependent blocks.
    pub fn assemble(record: &ProfileRecord) -> Vec<Block> {
        let mut blocks = Vec::new();

        blocks.push(Self::header(record));
        blocks.push(Self::contact(record));
        blocks.push(Block::Divider);

        if let Some(text) = record.introduction_text() {
            blocks.push(Block::Introduction {
                lines: split_lines(text),
            });
            blocks.push(Block::Divider);
        }

        if !record.experience.is_empty() {
            blocks.push(Block::SectionTitle {
                text: EXPERIENCE_TITLE.to_string(),
            });
            for entry in &record.experience {
                Self::experience(entry, &mut blocks);
            }
            blocks.push(Block::Divider);
        }

        if !record.education.is_empty() {
            blocks.push(Block::SectionTitle {
                text: EDUCATION_TITLE.to_string(),
            });
            for entry in &record.education {
                Self::education(entry, &mut blocks);
            }
            blocks.push(Block::Divider);
        }

        for section in &record.optional {
            Self::optional_section(section, &mut blocks);
            blocks.push(Block::Divider);
        }

        blocks
    }

    fn header(record: &ProfileRecord) -> Block {
        let mut text = record.full_name();
        if let Some(title) = record.headline() {
            text.push_str(" - ");
            text.push_str(title);
        }
        Block::Header { text }
    }

    fn contact(record: &ProfileRecord) -> Block {
        let mut fields = vec![
            LabeledField::new("Address", &record.address),
            LabeledField::new("Telephone", &record.telephone),
            LabeledField::new("Email", &record.email),
        ];
        if let Some(linkedin) = record.linkedin_url() {
            fields.push(LabeledField::new("LinkedIn", linkedin));
        }
        Block::Contact { fields }
    }

    fn experience(entry: &ExperienceEntry, blocks: &mut Vec<Block>) {
        blocks.push(Block::EntryRow {
            label: entry.company.clone(),
            dates: date_range(&entry.date_start, &entry.date_end),
        });
        blocks.push(Block::Role {
            text: entry.role.clone(),
        });
        push_bullets(&entry.bullets, blocks);

        if let Some(reference) = entry.displayable_reference() {
            blocks.push(Block::Reference {
                reference: reference_block(reference),
            });
        }
    }

    fn education(entry: &EducationEntry, blocks: &mut Vec<Block>) {
        blocks.push(Block::EntryRow {
            label: entry.institution.clone(),
            dates: date_range(&entry.date_start, &entry.date_end),
        });
        blocks.push(Block::Qualification {
            text: entry.qualification.clone(),
        });
        push_bullets(&entry.bullets, blocks);
    }

    fn optional_section(section: &OptionalSection, blocks: &mut Vec<Block>) {
        blocks.push(Block::OptionalTitle {
            text: section.title.clone(),
        });
        if let Some(subtitle) = section.subtitle_text() {
            blocks.push(Block::OptionalSubtitle {
                text: subtitle.to_string(),
            });
        }
        push_bullets(&section.bullets, blocks);

        for subsection in &section.subsections {
            blocks.push(Block::Subsection {
                title: subsection.title.clone(),
                subtitle: subsection.subtitle_text().map(str::to_string),
                bullets: subsection.bullets.clone(),
            });
        }
    }
}

fn date_range(start: &str, end: &str) -> String {
    format!("{} - {}", start, end)
}

fn push_bullets(bullets: &[String], blocks: &mut Vec<Block>) {
    if !bullets.is_empty() {
        blocks.push(Block::BulletList {
            items: bullets.to_vec(),
        });
    }
}

// Every line break is kept, including a trailing one.
fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split(['\n', '\r'])
        .map(str::to_string)
        .collect()
}

fn reference_block(reference: &Reference) -> ReferenceBlock {
    match reference {
        Reference::Plain(text) => ReferenceBlock::Plain { text: text.clone() },
        Reference::Structured(card) => structured_reference(card),
    }
}

fn present_fields(pairs: &[(&str, &str)]) -> Vec<LabeledField> {
    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| LabeledField::new(label, value))
        .collect()
}

fn structured_reference(card: &StructuredReference) -> ReferenceBlock {
    ReferenceBlock::Structured {
        identity: present_fields(&[
            ("Name", card.name.as_str()),
            ("Job title", card.job_title.as_str()),
            ("Company", card.company.as_str()),
        ]),
        contact: present_fields(&[("Phone", card.phone.as_str()), ("Email", card.email.as_str())]),
        relationship: present_fields(&[("Relationship", card.relationship.as_str())]).pop(),
    }
}
