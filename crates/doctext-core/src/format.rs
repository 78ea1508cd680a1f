//! Input format types for text extraction
//!
//! This module defines the `InputFormat` enum which represents the document
//! formats doctext can read.

use crate::error::DoctextError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputFormat {
    /// PDF document
    #[serde(rename = "PDF")]
    Pdf,
    /// Microsoft Word document (.docx)
    #[serde(rename = "DOCX")]
    Docx,
}

impl InputFormat {
    /// All formats, in the order they are listed to users
    pub const ALL: [Self; 2] = [Self::Pdf, Self::Docx];

    /// Detect format from a file extension (case-insensitive, without the dot)
    #[inline]
    #[must_use = "returns the detected format"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detect format from the extension of `path`
    ///
    /// # Errors
    /// Returns [`DoctextError::FormatError`] if the path has no extension or
    /// the extension is not a supported format.
    pub fn from_path(path: &Path) -> Result<Self, DoctextError> {
        let ext = path.extension().and_then(|s| s.to_str()).ok_or_else(|| {
            DoctextError::FormatError(format!("No file extension found: {}", path.display()))
        })?;

        Self::from_extension(ext)
            .ok_or_else(|| DoctextError::FormatError(format!("Unsupported format: {ext}")))
    }

    /// Canonical file extension for this format
    #[inline]
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// Human-readable name of the unit this format is split into
    #[inline]
    #[must_use]
    pub const fn unit_name(&self) -> &'static str {
        match self {
            Self::Pdf => "page",
            Self::Docx => "paragraph",
        }
    }
}

impl std::fmt::Display for InputFormat {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_uppercase().as_str() {
            "PDF" => Ok(Self::Pdf),
            "DOCX" | "WORD" => Ok(Self::Docx),
            other => Err(format!("Unknown input format: {other}")),
        }
    }
}
