// src/builder.rs
//! Fluent construction of a `ProfileRecord`

use crate::types::{EducationEntry, ExperienceEntry, OptionalSection, ProfileRecord, Reference};

#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    record: ProfileRecord,
}

fn optional(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_personal_info(
        &mut self,
        first_name: &str,
        last_name: &str,
        address: &str,
        telephone: &str,
        email: &str,
        linkedin: Option<&str>,
    ) -> &mut Self {
        self.record.first_name = first_name.to_string();
        self.record.last_name = last_name.to_string();
        self.record.address = address.to_string();
        self.record.telephone = telephone.to_string();
        self.record.email = email.to_string();
        self.record.linkedin = optional(linkedin);
        self
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.record.title = optional(Some(title));
        self
    }

    pub fn set_introduction(&mut self, introduction: &str) -> &mut Self {
        self.record.introduction = optional(Some(introduction));
        self
    }

    pub fn add_experience(
        &mut self,
        company: &str,
        role: &str,
        date_start: &str,
        date_end: &str,
        bullets: &[&str],
        reference: Option<Reference>,
    ) -> &mut Self {
        let mut entry =
            ExperienceEntry::new(company, role, date_start, date_end).with_bullets(bullets.iter().copied());
        entry.reference = reference.filter(Reference::is_present);
        self.record.experience.push(entry);
        self
    }

    pub fn add_education(
        &mut self,
        institution: &str,
        qualification: &str,
        date_start: &str,
        date_end: &str,
        bullets: &[&str],
    ) -> &mut Self {
        self.record.education.push(
            EducationEntry::new(institution, qualification, date_start, date_end)
                .with_bullets(bullets.iter().copied()),
        );
        self
    }

    pub fn add_optional_section(
        &mut self,
        title: &str,
        bullets: &[&str],
        subtitle: Option<&str>,
    ) -> &mut Self {
        let mut section = OptionalSection::new(title).with_bullets(bullets.iter().copied());
        section.subtitle = optional(subtitle);
        self.record.optional.push(section);
        self
    }

    /// Sections with subsections are composed with `OptionalSection::with_*`.
    pub fn add_section(&mut self, section: OptionalSection) -> &mut Self {
        self.record.optional.push(section);
        self
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    pub fn build(&self) -> ProfileRecord {
        self.record.clone()
    }
}
