//! References to uploaded paper documents.
//!
//! Document bytes live in external storage; the paper only keeps a pointer
//! to the latest upload.

use std::fmt;
use std::path::Path;

use confreview_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// File extensions accepted for paper documents.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// A validated pointer to an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    /// Validates `raw` as a document reference.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `raw` is blank or does not end in
    /// one of [`ALLOWED_EXTENSIONS`].
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::Validation("document is required".to_owned()));
        }
        let extension = Path::new(raw)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(Self(raw.to_owned())),
            _ => Err(DomainError::Validation(format!(
                "document {raw} must be a PDF or DOC file"
            ))),
        }
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
