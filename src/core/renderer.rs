// src/core/renderer.rs
//! Boundary to the external PDF renderer

use crate::config::GeneratorConfig;
use crate::core::markup::PageGeometry;
use crate::error::{CvError, Result};
use crate::workspace::RenderWorkspace;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Turns document markup into the bytes of a paginated document.
///
/// One synchronous call per document; failures are reported once and never retried.
pub trait Renderer: Send + Sync {
    fn render(&self, markup: &str, geometry: &PageGeometry) -> Result<Vec<u8>>;
}

/// Compiles markup with the `typst` command line compiler.
#[derive(Debug, Clone)]
pub struct TypstRenderer {
    binary: PathBuf,
    font_paths: Vec<PathBuf>,
}

impl TypstRenderer {
    pub fn new(binary: PathBuf) -> Self {
        Self {
            binary,
            font_paths: Vec::new(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            binary: config.typst_binary.clone(),
            font_paths: config.font_paths_absolute(),
        }
    }

    /// Whether the configured binary can be executed at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn compile_command(&self, source: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("compile").arg(source).arg(output);
        for font_path in &self.font_paths {
            cmd.arg("--font-path").arg(font_path);
        }
        cmd
    }
}

impl Default for TypstRenderer {
    fn default() -> Self {
        Self::new(PathBuf::from("typst"))
    }
}

impl Renderer for TypstRenderer {
    fn render(&self, markup: &str, geometry: &PageGeometry) -> Result<Vec<u8>> {
        let workspace = RenderWorkspace::create()?;

        let document = format!("{}{}", geometry.typst_page_rule(), markup);
        let source = workspace.write_source(&document)?;
        let output_path = workspace.output_path();

        debug!(
            "Compiling {} ({} bytes of markup) with {}",
            source.display(),
            document.len(),
            self.binary.display()
        );

        let output = self
            .compile_command(&source, &output_path)
            .output()
            .map_err(|e| {
                CvError::Render(format!(
                    "failed to execute {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            workspace.cleanup();
            return Err(CvError::Render(format!(
                "typst compilation failed: stderr={}, stdout={}",
                stderr.trim(),
                stdout.trim()
            )));
        }

        let bytes = workspace.read_output()?;
        workspace.cleanup();

        info!("Rendered {} bytes of PDF", bytes.len());
        Ok(bytes)
    }
}
