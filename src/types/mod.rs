// src/types/mod.rs
pub mod profile;

pub use profile::{
    EducationEntry, ExperienceEntry, OptionalSection, ProfileRecord, Reference,
    StructuredReference, Subsection,
};
