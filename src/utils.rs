// src/utils.rs
use chrono::{Datelike, Utc};

pub const PDF_SIGNATURE: &[u8] = b"%PDF";

/// Normalize a display name for file system usage
pub fn sanitize_filename(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// `<Name>_CV_<year>.pdf`, or `CV_<year>.pdf` when the name has nothing usable
pub fn pdf_filename(full_name: &str, year: i32) -> String {
    let stem = sanitize_filename(full_name);
    if stem.is_empty() {
        format!("CV_{}.pdf", year)
    } else {
        format!("{}_CV_{}.pdf", stem, year)
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn has_pdf_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("John Doe"), "John_Doe");
        assert_eq!(sanitize_filename("  jean-paul  "), "jean-paul");
        assert_eq!(sanitize_filename("Marie@Company"), "MarieCompany");
        assert_eq!(sanitize_filename("José García-López"), "José_García-López");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
    }

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename("John Doe", 2026), "John_Doe_CV_2026.pdf");
        assert_eq!(pdf_filename(" ", 2026), "CV_2026.pdf");
    }

    #[test]
    fn test_has_pdf_signature() {
        assert!(has_pdf_signature(b"%PDF-1.7\n"));
        assert!(!has_pdf_signature(b"<html>"));
        assert!(!has_pdf_signature(b""));
    }
}
