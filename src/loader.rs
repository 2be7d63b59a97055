// src/loader.rs
//! Reading profile records from JSON, TOML or YAML

use crate::error::{CvError, Result};
use crate::types::ProfileRecord;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Json,
    Toml,
    Yaml,
}

impl ProfileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .ok_or_else(|| {
                CvError::invalid_input(format!("profile file has no extension: {}", path.display()))
            })?;

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(CvError::invalid_input(format!(
                "unsupported profile format: {}. Allowed: json, toml, yaml",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
        }
    }
}

fn parse_error(format: ProfileFormat, err: impl std::fmt::Display) -> CvError {
    CvError::invalid_input(format!("failed to parse {} profile: {}", format.name(), err))
}

pub fn from_json_str(content: &str) -> Result<ProfileRecord> {
    serde_json::from_str(content).map_err(|e| parse_error(ProfileFormat::Json, e))
}

pub fn from_toml_str(content: &str) -> Result<ProfileRecord> {
    toml::from_str(content).map_err(|e| parse_error(ProfileFormat::Toml, e))
}

pub fn from_yaml_str(content: &str) -> Result<ProfileRecord> {
    // An empty YAML document is an empty profile, not an error.
    if content.trim().is_empty() {
        return Ok(ProfileRecord::default());
    }
    serde_yaml::from_str(content).map_err(|e| parse_error(ProfileFormat::Yaml, e))
}

pub fn from_str(content: &str, format: ProfileFormat) -> Result<ProfileRecord> {
    match format {
        ProfileFormat::Json => from_json_str(content),
        ProfileFormat::Toml => from_toml_str(content),
        ProfileFormat::Yaml => from_yaml_str(content),
    }
}

pub fn from_path(path: &Path) -> Result<ProfileRecord> {
    let format = ProfileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| CvError::io(path, e))?;
    let record = from_str(&content, format)?;

    debug!(
        "Loaded {} profile from {}: {} experience, {} education, {} optional sections",
        format.name(),
        path.display(),
        record.experience.len(),
        record.education.len(),
        record.optional.len()
    );
    Ok(record)
}
