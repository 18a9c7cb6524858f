//! Customer intake: the details and files a customer sends back after a
//! lead is confirmed. Files are described, never stored.

use crate::error::{CrmError, Result};
use crate::lead::CustomerInput;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_MAX_FILES: usize = 5;

// ---------------------------------------------------------------------------
// File selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            size_bytes,
            content_type,
        }
    }

    /// Describe a local file by name, size and guessed content type.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(CrmError::Validation(format!(
                "not a file: {}",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, meta.len()))
    }

    /// Size in kilobytes, rounded to the nearest whole number.
    pub fn size_kb(&self) -> u64 {
        (self.size_bytes + 512) / 1024
    }
}

/// Files picked for upload, capped at `max_files`.
#[derive(Debug, Clone)]
pub struct FileSelection {
    max_files: usize,
    files: Vec<SelectedFile>,
}

impl FileSelection {
    pub fn new(max_files: usize) -> Self {
        Self {
            max_files,
            files: Vec::new(),
        }
    }

    /// Add a batch of files. The whole batch is refused if it would exceed
    /// the cap.
    pub fn add(&mut self, batch: Vec<SelectedFile>) -> Result<()> {
        if self.files.len() + batch.len() > self.max_files {
            return Err(CrmError::Validation(format!(
                "You can only upload a maximum of {} files",
                self.max_files
            )));
        }
        self.files.extend(batch);
        Ok(())
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<SelectedFile> {
        self.files
    }
}

impl Default for FileSelection {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILES)
    }
}

// ---------------------------------------------------------------------------
// Intake form
// ---------------------------------------------------------------------------

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").unwrap())
}

fn is_phone(s: &str) -> bool {
    let digits = s.chars().filter(char::is_ascii_digit).count();
    phone_re().is_match(s) && (7..=15).contains(&digits)
}

#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub name: String,
    pub mobile: String,
    pub alternative_mobile: Option<String>,
    pub notes: Option<String>,
    pub files: Vec<SelectedFile>,
}

impl IntakeForm {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.mobile.trim().is_empty() {
            return Err(CrmError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        if !is_phone(self.mobile.trim()) {
            return Err(CrmError::Validation(format!(
                "invalid mobile number: {}",
                self.mobile
            )));
        }
        if let Some(alt) = self.alternative_mobile.as_deref().map(str::trim) {
            if !alt.is_empty() && !is_phone(alt) {
                return Err(CrmError::Validation(format!(
                    "invalid alternative mobile number: {alt}"
                )));
            }
        }
        if self.files.is_empty() {
            return Err(CrmError::Validation(
                "Please upload at least one file".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and turn the form into a customer input record.
    pub fn submit(self, now: DateTime<Utc>) -> Result<CustomerInput> {
        self.validate()?;
        let non_blank = |s: Option<String>| {
            s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };
        Ok(CustomerInput {
            id: format!("ci-{}", uuid::Uuid::new_v4().simple()),
            name: self.name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            alternative_mobile: non_blank(self.alternative_mobile),
            files: self.files.into_iter().map(|f| f.name).collect(),
            notes: non_blank(self.notes),
            submitted_at: now,
        })
    }
}

// ---------------------------------------------------------------------------
// Intake links
// ---------------------------------------------------------------------------

static NON_ALNUM_RE: OnceLock<Regex> = OnceLock::new();

pub fn slugify(name: &str) -> String {
    let re = NON_ALNUM_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());
    re.replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Link a customer follows to submit their details for a lead.
pub fn intake_url(base: &str, customer_name: &str, token: &str) -> String {
    format!(
        "{}/customer-input/{}/{}",
        base.trim_end_matches('/'),
        slugify(customer_name),
        token
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn form() -> IntakeForm {
        IntakeForm {
            name: "Green Gardens".into(),
            mobile: "+1122334455".into(),
            files: vec![SelectedFile::new("logo.png", 2048)],
            ..Default::default()
        }
    }

    #[test]
    fn required_fields() {
        let mut f = form();
        f.name = "  ".into();
        let err = f.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields");

        let mut f = form();
        f.mobile.clear();
        assert!(f.validate().is_err());
    }

    #[test]
    fn at_least_one_file_is_required() {
        let mut f = form();
        f.files.clear();
        let err = f.submit(Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "Please upload at least one file");
    }

    #[test]
    fn missing_fields_reported_before_missing_files() {
        let f = IntakeForm {
            name: "Acme".into(),
            ..Default::default()
        };
        let err = f.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn phone_formats() {
        for ok in ["+1122334455", "98765 43210", "022-2345-6789", "1234567"] {
            assert!(is_phone(ok), "{ok}");
        }
        for bad in ["12345", "call me", "+12-", "1234567890123456"] {
            assert!(!is_phone(bad), "{bad}");
        }
    }

    #[test]
    fn blank_alternative_is_dropped() {
        let mut f = form();
        f.alternative_mobile = Some("   ".into());
        f.notes = Some("eco theme".into());
        let input = f.submit(Utc::now()).unwrap();
        assert!(input.alternative_mobile.is_none());
        assert_eq!(input.notes.as_deref(), Some("eco theme"));
        assert!(input.id.starts_with("ci-"));
    }

    #[test]
    fn bad_alternative_is_rejected() {
        let mut f = form();
        f.alternative_mobile = Some("not a number".into());
        assert!(f.submit(Utc::now()).is_err());
    }

    #[test]
    fn submit_records_file_names() {
        let mut f = form();
        f.files = vec![
            SelectedFile::new("logo.png", 2048),
            SelectedFile::new("content.pdf", 10_000),
        ];
        let input = f.submit(Utc::now()).unwrap();
        assert_eq!(input.files, vec!["logo.png", "content.pdf"]);
    }

    #[test]
    fn selected_file_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proof.pdf");
        std::fs::write(&path, vec![0u8; 1536]).unwrap();
        let file = SelectedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "proof.pdf");
        assert_eq!(file.size_bytes, 1536);
        assert_eq!(file.size_kb(), 2);
        assert_eq!(file.content_type, "application/pdf");

        assert!(SelectedFile::from_path(dir.path()).is_err());
        assert!(SelectedFile::from_path(&dir.path().join("missing.jpg")).is_err());
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(
            SelectedFile::new("artwork.zzz", 1).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn selection_cap_refuses_whole_batch() {
        let mut sel = FileSelection::new(2);
        sel.add(vec![SelectedFile::new("a.jpg", 1)]).unwrap();
        let err = sel
            .add(vec![SelectedFile::new("b.jpg", 1), SelectedFile::new("c.jpg", 1)])
            .unwrap_err();
        assert!(err.to_string().contains("maximum of 2 files"));
        assert_eq!(sel.files().len(), 1);

        sel.add(vec![SelectedFile::new("b.jpg", 1)]).unwrap();
        let names: Vec<_> = sel.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
        assert_eq!(sel.into_files().len(), 2);
    }

    #[test]
    fn intake_links() {
        assert_eq!(slugify("Acme Corporation"), "acme-corporation");
        assert_eq!(slugify("  Luxe & Co.  "), "luxe-co");
        assert_eq!(
            intake_url("attracta.com/", "TechStart Inc", "67890"),
            "attracta.com/customer-input/techstart-inc/67890"
        );
    }
}
