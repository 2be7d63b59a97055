//! Profile-to-PDF CV generation.
//!
//! A [`ProfileRecord`] is assembled into an ordered list of layout [`Block`]s,
//! serialized to Typst markup and handed to a [`Renderer`] for the final PDF.

use anyhow::Result;
use std::path::PathBuf;

pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod loader;
pub mod types;
pub mod utils;
pub mod workspace;

pub use builder::ProfileBuilder;
pub use config::GeneratorConfig;
pub use crate::core::{Block, DocumentAssembler, PageGeometry, Renderer, TypstMarkup, TypstRenderer};
pub use error::CvError;
pub use generator::CvGenerator;
pub use types::{
    EducationEntry, ExperienceEntry, OptionalSection, ProfileRecord, Reference,
    StructuredReference, Subsection,
};

/// Assemble a record into layout blocks
pub fn assemble(record: &ProfileRecord) -> Vec<Block> {
    DocumentAssembler::assemble(record)
}

/// Convenience function for quick CV generation with the `typst` binary
pub fn generate_cv(record: &ProfileRecord, output_dir: Option<PathBuf>) -> Result<PathBuf> {
    let mut config = GeneratorConfig::load()?;

    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }

    CvGenerator::with_typst(config).generate(record)
}
