//! Document converter
//!
//! Detects the input format and dispatches to the matching backend.

use crate::docx::DocxBackend;
use crate::pdf::PdfBackend;
use crate::traits::{BackendOptions, DocumentBackend};
use doctext_core::{ConversionResult, DoctextError, Document, InputFormat};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Converts PDF and DOCX files into [`Document`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocumentConverter {
    options: BackendOptions,
}

impl DocumentConverter {
    /// Create a converter with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom backend options
    #[inline]
    #[must_use]
    pub const fn with_options(options: BackendOptions) -> Self {
        Self { options }
    }

    /// Backend options used for every conversion
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &BackendOptions {
        &self.options
    }

    /// Convert a file, detecting its format from the extension
    ///
    /// # Errors
    /// Returns an error if the format is unsupported, the file cannot be
    /// read, or the backend fails to parse it.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<ConversionResult, DoctextError> {
        let path = path.as_ref();
        let format = InputFormat::from_path(path)?;
        self.convert_with_format(path, format)
    }

    /// Convert a file using an explicit format
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn convert_with_format<P: AsRef<Path>>(
        &self,
        path: P,
        format: InputFormat,
    ) -> Result<ConversionResult, DoctextError> {
        let path = path.as_ref();
        debug!("Converting {} as {format}", path.display());

        let start = Instant::now();
        let document = match format {
            InputFormat::Pdf => PdfBackend.parse_file(path, &self.options)?,
            InputFormat::Docx => DocxBackend.parse_file(path, &self.options)?,
        };
        let latency = start.elapsed();

        info!(
            "Extracted {} {}(s) from {} in {:?}",
            document.unit_count(),
            format.unit_name(),
            path.display(),
            latency
        );

        Ok(ConversionResult { document, latency })
    }

    /// Convert an in-memory document
    ///
    /// # Errors
    /// Returns an error if the bytes cannot be parsed as `format`.
    pub fn convert_bytes(&self, data: &[u8], format: InputFormat) -> Result<Document, DoctextError> {
        match format {
            InputFormat::Pdf => PdfBackend.parse_bytes(data, &self.options),
            InputFormat::Docx => DocxBackend.parse_bytes(data, &self.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_rejects_unknown_extension() {
        let err = DocumentConverter::new().convert("notes.odt").unwrap_err();
        assert!(matches!(err, DoctextError::FormatError(_)));
    }

    #[test]
    fn test_convert_rejects_missing_extension() {
        let err = DocumentConverter::new().convert("Makefile").unwrap_err();
        assert!(err.to_string().contains("No file extension"));
    }

    #[test]
    fn test_convert_missing_file() {
        let err = DocumentConverter::new()
            .convert("/nonexistent/QUESTIONNAIRE.docx")
            .unwrap_err();
        assert!(matches!(err, DoctextError::IoError(_)));
    }

    #[test]
    fn test_with_options() {
        let converter =
            DocumentConverter::with_options(BackendOptions::default().with_max_pages(Some(2)));
        assert_eq!(converter.options().max_pages, Some(2));
    }
}
