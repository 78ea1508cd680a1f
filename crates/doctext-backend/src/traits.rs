//! Core trait definitions for document backends

use doctext_core::{DoctextError, Document, InputFormat};
use std::path::Path;

/// Options for backend processing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BackendOptions {
    /// Maximum pages to extract (None = all). Ignored by non-paged formats.
    pub max_pages: Option<usize>,
}

impl BackendOptions {
    /// Set maximum pages to extract
    #[inline]
    #[must_use = "returns options with maximum pages configured"]
    pub const fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Main trait for document backends
///
/// Each backend (PDF, DOCX) implements this trait to turn a file into an
/// ordered [`Document`].
pub trait DocumentBackend: Send + Sync {
    /// Get the format this backend handles
    fn format(&self) -> InputFormat;

    /// Parse document from bytes
    ///
    /// # Errors
    /// Returns an error if parsing fails.
    fn parse_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<Document, DoctextError>;

    /// Parse document from file path
    ///
    /// # Errors
    /// Returns an error if file reading or parsing fails.
    fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
        options: &BackendOptions,
    ) -> Result<Document, DoctextError> {
        let data = std::fs::read(path.as_ref()).map_err(DoctextError::IoError)?;
        self.parse_bytes(&data, options)
    }

    /// Check if this backend can handle the given format
    fn can_handle(&self, format: InputFormat) -> bool {
        self.format() == format
    }
}
