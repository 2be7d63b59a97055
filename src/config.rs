// src/config.rs
use crate::error::{CvError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub typst_binary: PathBuf,
    pub font_paths: Vec<PathBuf>,
    pub root_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    output_dir: Option<PathBuf>,
    typst_binary: Option<PathBuf>,
    #[serde(default)]
    font_paths: Vec<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        // Capture the current directory at creation time
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            output_dir: PathBuf::from("output"),
            typst_binary: PathBuf::from("typst"),
            font_paths: Vec::new(),
            root_dir: current_dir,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_typst_binary(mut self, binary: PathBuf) -> Self {
        self.typst_binary = binary;
        self
    }

    pub fn with_font_path(mut self, path: PathBuf) -> Self {
        self.font_paths.push(path);
        self
    }

    /// Load `config.yaml` from the current directory, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| CvError::io(path, e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| CvError::config(format!("failed to parse config: {}", e)))?
        };

        let mut config = Self::default();
        if let Some(dir) = file.output_dir {
            config.output_dir = dir;
        }
        if let Some(binary) = file.typst_binary {
            config.typst_binary = binary;
        }
        config.font_paths = file.font_paths;
        Ok(config)
    }

    fn absolute_path(&self, relative_path: &Path) -> PathBuf {
        if relative_path.is_absolute() {
            relative_path.to_path_buf()
        } else {
            self.root_dir.join(relative_path)
        }
    }

    pub fn output_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.output_dir)
    }

    pub fn font_paths_absolute(&self) -> Vec<PathBuf> {
        self.font_paths
            .iter()
            .map(|p| self.absolute_path(p))
            .collect()
    }
}
