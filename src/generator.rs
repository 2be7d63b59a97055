// src/generator.rs
use crate::config::GeneratorConfig;
use crate::core::{Block, DocumentAssembler, PageGeometry, Renderer, TypstMarkup, TypstRenderer};
use crate::error::CvError;
use crate::types::ProfileRecord;
use crate::utils::{current_year, has_pdf_signature, pdf_filename};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CvGenerator {
    pub config: GeneratorConfig,
    renderer: Box<dyn Renderer>,
}

impl CvGenerator {
    pub fn new(config: GeneratorConfig, renderer: Box<dyn Renderer>) -> Self {
        Self { config, renderer }
    }

    /// Generator backed by the `typst` binary named in the config
    pub fn with_typst(config: GeneratorConfig) -> Self {
        let renderer = TypstRenderer::from_config(&config);
        Self::new(config, Box::new(renderer))
    }

    pub fn assemble(&self, record: &ProfileRecord) -> Vec<Block> {
        DocumentAssembler::assemble(record)
    }

    pub fn render_markup(&self, record: &ProfileRecord) -> String {
        TypstMarkup::render(&self.assemble(record))
    }

    /// Render the record to PDF bytes along with a download file name
    pub fn generate_pdf_data(&self, record: &ProfileRecord) -> Result<(Vec<u8>, String)> {
        let markup = self.render_markup(record);
        let pdf_data = self
            .renderer
            .render(&markup, &PageGeometry::a4_portrait())?;

        if !has_pdf_signature(&pdf_data) {
            return Err(CvError::Render(format!(
                "renderer output is not a PDF ({} bytes)",
                pdf_data.len()
            ))
            .into());
        }

        let filename = pdf_filename(&record.full_name(), current_year());
        Ok((pdf_data, filename))
    }

    /// Generate the CV into the configured output directory
    pub fn generate(&self, record: &ProfileRecord) -> Result<PathBuf> {
        let (pdf_data, filename) = self.generate_pdf_data(record)?;

        let output_dir = self.config.output_dir_absolute();
        fs::create_dir_all(&output_dir).context("Failed to create output directory")?;
        let output_path = output_dir.join(filename);
        Self::write_pdf(&output_path, &pdf_data)?;

        info!(
            "✅ Successfully compiled CV for {} to {}",
            record.full_name().trim(),
            output_path.display()
        );
        Ok(output_path)
    }

    /// Generate the CV into an explicit file
    pub fn generate_to(&self, record: &ProfileRecord, output_path: &Path) -> Result<PathBuf> {
        let (pdf_data, _) = self.generate_pdf_data(record)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Self::write_pdf(output_path, &pdf_data)?;

        info!("✅ Successfully compiled CV to {}", output_path.display());
        Ok(output_path.to_path_buf())
    }

    fn write_pdf(path: &Path, pdf_data: &[u8]) -> Result<()> {
        fs::write(path, pdf_data)
            .with_context(|| format!("Failed to write PDF: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ProfileBuilder;
    use crate::error;
    use crate::types::OptionalSection;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StubRenderer {
        calls: Arc<Mutex<Vec<(String, PageGeometry)>>>,
    }

    impl Renderer for StubRenderer {
        fn render(&self, markup: &str, geometry: &PageGeometry) -> error::Result<Vec<u8>> {
            self.calls
                .lock()
                .unwrap()
                .push((markup.to_string(), *geometry));
            Ok(b"%PDF-1.7\n%stub\n".to_vec())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _: &str, _: &PageGeometry) -> error::Result<Vec<u8>> {
            Err(CvError::Render("output target is not writable".to_string()))
        }
    }

    struct HtmlRenderer;

    impl Renderer for HtmlRenderer {
        fn render(&self, _: &str, _: &PageGeometry) -> error::Result<Vec<u8>> {
            Ok(b"<html></html>".to_vec())
        }
    }

    fn john_doe() -> ProfileRecord {
        ProfileRecord {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            ..ProfileRecord::default()
        }
    }

    #[test]
    fn test_generate_pdf_data_minimal_record() {
        let stub = StubRenderer::default();
        let calls = stub.calls.clone();
        let generator = CvGenerator::new(GeneratorConfig::default(), Box::new(stub));

        let (pdf, filename) = generator.generate_pdf_data(&john_doe()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(!pdf.is_empty());
        assert!(filename.starts_with("John_Doe_CV_"));
        assert!(filename.ends_with(".pdf"));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("\"John Doe\""));
        assert_eq!(calls[0].1, PageGeometry::a4_portrait());
    }

    #[test]
    fn test_header_contains_name() {
        let generator = CvGenerator::new(GeneratorConfig::default(), Box::new(StubRenderer::default()));
        let blocks = generator.assemble(&john_doe());
        assert_eq!(
            blocks[0],
            Block::Header {
                text: "John Doe".to_string()
            }
        );
    }

    #[test]
    fn test_renderer_failure_propagates() {
        let generator = CvGenerator::new(GeneratorConfig::default(), Box::new(FailingRenderer));
        let err = generator.generate_pdf_data(&john_doe()).unwrap_err();
        match err.downcast_ref::<CvError>() {
            Some(CvError::Render(message)) => assert_eq!(message, "output target is not writable"),
            other => panic!("expected render error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_pdf_output_is_rejected() {
        let generator = CvGenerator::new(GeneratorConfig::default(), Box::new(HtmlRenderer));
        let err = generator.generate_pdf_data(&john_doe()).unwrap_err();
        assert!(matches!(err.downcast_ref::<CvError>(), Some(CvError::Render(_))));
    }

    #[test]
    fn test_generate_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::default().with_output_dir(dir.path().join("out"));
        let generator = CvGenerator::new(config, Box::new(StubRenderer::default()));

        let record = ProfileBuilder::new()
            .set_personal_info("Jane", "Smith", "456 Oak Avenue", "+1-555-123-4567", "jane@example.com", None)
            .add_section(OptionalSection::new("Languages").with_bullets(["English", "Spanish"]))
            .build();

        let path = generator.generate(&record).unwrap();
        assert!(path.starts_with(dir.path().join("out")));
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_failed_render_creates_no_directories() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("out");
        let config = GeneratorConfig::default().with_output_dir(output_dir.clone());
        let generator = CvGenerator::new(config, Box::new(FailingRenderer));

        assert!(generator.generate(&john_doe()).is_err());
        assert!(!output_dir.exists());

        let target = dir.path().join("nested").join("cv.pdf");
        assert!(generator.generate_to(&john_doe(), &target).is_err());
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn test_generate_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("empty_cv.pdf");
        let generator = CvGenerator::new(GeneratorConfig::default(), Box::new(StubRenderer::default()));

        let path = generator.generate_to(&ProfileRecord::default(), &target).unwrap();
        assert_eq!(path, target);
        assert!(fs::read(&target).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_end_to_end_with_typst_when_installed() {
        let generator = CvGenerator::with_typst(GeneratorConfig::default());
        if !TypstRenderer::default().is_available() {
            eprintln!("typst not found on PATH, skipping");
            return;
        }

        let record = ProfileBuilder::new()
            .set_personal_info("José", "García-López", "123 Café Street, São Paulo", "+55 11 99999-9999", "jose@example.com", None)
            .set_introduction("Développeur expérimenté\navec expertise en technologies web & mobile.")
            .add_experience("Tech Corp", "Engineer", "Jan 2020", "Present", &["Built \"things\" #1 [fast]"], Some("Ask Jane".into()))
            .build();

        let (pdf, _) = generator.generate_pdf_data(&record).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(pdf.len() > 1000);
    }
}
