// src/types/profile.rs
//! Profile record: the person's identity, contact details, history and free sections.
//!
//! Every field is defaulted at deserialization time (missing keys and explicit
//! `null` both become empty values), so the assembler never deals with absent data.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ===== Profile =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, alias = "firstName", deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, alias = "lastName", deserialize_with = "null_as_default")]
    pub last_name: String,
    /// Professional headline shown next to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub telephone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    /// Free text; line breaks are kept as visual line breaks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub optional: Vec<OptionalSection>,
}

impl ProfileRecord {
    /// `first_name + " " + last_name`, the space is kept even when both are empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn headline(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn linkedin_url(&self) -> Option<&str> {
        non_empty(&self.linkedin)
    }

    pub fn introduction_text(&self) -> Option<&str> {
        non_empty(&self.introduction)
    }
}

// ===== History entries =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, alias = "dateStart", deserialize_with = "null_as_default")]
    pub date_start: String,
    #[serde(default, alias = "dateEnd", deserialize_with = "null_as_default")]
    pub date_end: String,
    #[serde(default, deserialize_with = "bullet_items")]
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

impl ExperienceEntry {
    pub fn new(company: &str, role: &str, date_start: &str, date_end: &str) -> Self {
        Self {
            company: company.to_string(),
            role: role.to_string(),
            date_start: date_start.to_string(),
            date_end: date_end.to_string(),
            bullets: Vec::new(),
            reference: None,
        }
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<Reference>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// The reference to display, if any. Empty text and structured references
    /// without a single populated field count as no reference.
    pub fn displayable_reference(&self) -> Option<&Reference> {
        self.reference.as_ref().filter(|r| r.is_present())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qualification: String,
    #[serde(default, alias = "dateStart", deserialize_with = "null_as_default")]
    pub date_start: String,
    #[serde(default, alias = "dateEnd", deserialize_with = "null_as_default")]
    pub date_end: String,
    #[serde(default, deserialize_with = "bullet_items")]
    pub bullets: Vec<String>,
}

impl EducationEntry {
    pub fn new(institution: &str, qualification: &str, date_start: &str, date_end: &str) -> Self {
        Self {
            institution: institution.to_string(),
            qualification: qualification.to_string(),
            date_start: date_start.to_string(),
            date_end: date_end.to_string(),
            bullets: Vec::new(),
        }
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }
}

// ===== References =====

/// Either the legacy one-line reference or the structured contact card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reference {
    Plain(String),
    Structured(StructuredReference),
}

impl Reference {
    pub fn is_present(&self) -> bool {
        match self {
            Reference::Plain(text) => !text.is_empty(),
            Reference::Structured(card) => !card.is_empty(),
        }
    }
}

impl From<&str> for Reference {
    fn from(text: &str) -> Self {
        Reference::Plain(text.to_string())
    }
}

impl From<String> for Reference {
    fn from(text: String) -> Self {
        Reference::Plain(text)
    }
}

impl From<StructuredReference> for Reference {
    fn from(card: StructuredReference) -> Self {
        Reference::Structured(card)
    }
}

// A reference is accepted as text or as a map; anything else is a caller bug.
impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReferenceVisitor;

        impl<'de> Visitor<'de> for ReferenceVisitor {
            type Value = Reference;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a reference string or a structured reference map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Reference, E>
            where
                E: de::Error,
            {
                Ok(Reference::Plain(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Reference, E>
            where
                E: de::Error,
            {
                Ok(Reference::Plain(value))
            }

            fn visit_map<A>(self, map: A) -> Result<Reference, A::Error>
            where
                A: MapAccess<'de>,
            {
                StructuredReference::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(Reference::Structured)
            }
        }

        deserializer.deserialize_any(ReferenceVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredReference {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "jobTitle", deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationship: String,
}

impl StructuredReference {
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.job_title,
            &self.company,
            &self.phone,
            &self.email,
            &self.relationship,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}

// ===== Free sections =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionalSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "bullet_items")]
    pub bullets: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subsections: Vec<Subsection>,
}

impl OptionalSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subsection(mut self, subsection: Subsection) -> Self {
        self.subsections.push(subsection);
        self
    }

    pub fn subtitle_text(&self) -> Option<&str> {
        non_empty(&self.subtitle)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// `None` when the key is missing, `Some(None)` for an explicit `null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "explicit_null"
    )]
    pub subtitle: Option<Option<String>>,
    #[serde(default, deserialize_with = "bullet_items")]
    pub bullets: Vec<String>,
}

impl Subsection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(Some(subtitle.to_string()));
        self
    }

    pub fn with_null_subtitle(mut self) -> Self {
        self.subtitle = Some(None);
        self
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    pub fn subtitle_text(&self) -> Option<&str> {
        self.subtitle
            .as_ref()
            .and_then(|s| s.as_deref())
            .filter(|s| !s.is_empty())
    }
}

// ===== Serde helpers =====

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Bullet lists tolerate a null list and null items; null items are dropped.
fn bullet_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().flatten().collect())
}

fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
