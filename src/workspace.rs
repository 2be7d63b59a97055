// src/workspace.rs
use crate::error::{CvError, Result};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::{debug, warn};

pub const SOURCE_FILE: &str = "main.typ";
pub const OUTPUT_FILE: &str = "cv.pdf";

/// Scratch directory for one render: `main.typ` in, `cv.pdf` out.
///
/// Each render gets its own directory so concurrent generations never
/// see each other's files.
pub struct RenderWorkspace {
    dir: TempDir,
}

impl RenderWorkspace {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("cvpress-")
            .tempdir()
            .map_err(|e| CvError::io(std::env::temp_dir(), e))?;
        debug!("Prepared render workspace in {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn source_path(&self) -> PathBuf {
        self.dir.path().join(SOURCE_FILE)
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join(OUTPUT_FILE)
    }

    pub fn write_source(&self, markup: &str) -> Result<PathBuf> {
        let path = self.source_path();
        fs::write(&path, markup).map_err(|e| CvError::io(&path, e))?;
        Ok(path)
    }

    pub fn read_output(&self) -> Result<Vec<u8>> {
        let path = self.output_path();
        fs::read(&path).map_err(|e| CvError::io(&path, e))
    }

    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove workspace {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_roundtrip_and_cleanup() {
        let workspace = RenderWorkspace::create().unwrap();
        let source = workspace.write_source("#set text(size: 10pt)").unwrap();
        assert!(source.ends_with(SOURCE_FILE));
        assert_eq!(fs::read_to_string(&source).unwrap(), "#set text(size: 10pt)");

        fs::write(workspace.output_path(), b"%PDF-1.7").unwrap();
        assert_eq!(workspace.read_output().unwrap(), b"%PDF-1.7");

        let dir = source.parent().unwrap().to_path_buf();
        workspace.cleanup();
        assert!(!dir.exists());
    }

    #[test]
    fn test_missing_output_is_io_error() {
        let workspace = RenderWorkspace::create().unwrap();
        match workspace.read_output() {
            Err(CvError::Io { path, .. }) => assert!(path.ends_with(OUTPUT_FILE)),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_workspaces_are_distinct() {
        let a = RenderWorkspace::create().unwrap();
        let b = RenderWorkspace::create().unwrap();
        assert_ne!(a.source_path(), b.source_path());
    }
}
