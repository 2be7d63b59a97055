// src/core/mod.rs
//! Document assembly, markup serialization and the renderer boundary

pub mod assembler;
pub mod blocks;
pub mod markup;
pub mod renderer;

pub use assembler::DocumentAssembler;
pub use blocks::{Block, LabeledField, ReferenceBlock};
pub use markup::{PageGeometry, TypstMarkup};
pub use renderer::{Renderer, TypstRenderer};
