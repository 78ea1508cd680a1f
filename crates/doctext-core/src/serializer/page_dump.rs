//! Page dump layout for paged documents
//!
//! Every page contributes a `--- Page N ---` header chunk followed, when the
//! page has any text, by a text chunk. Chunks are joined with a newline:
//!
//! ```text
//!
//! --- Page 1 ---
//!
//! first page text
//!
//! --- Page 2 ---
//! ```

use crate::document::{Document, Page};
use crate::error::DoctextError;

/// Serializer producing the page dump layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PageDumpSerializer;

impl PageDumpSerializer {
    /// Create a new page dump serializer
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Header chunk for a 1-based page number
    #[inline]
    #[must_use]
    pub fn page_header(number: usize) -> String {
        format!("\n--- Page {number} ---\n")
    }

    /// Serialize pages in the order given
    #[must_use]
    pub fn serialize_pages(&self, pages: &[Page]) -> String {
        let mut chunks = Vec::with_capacity(pages.len() * 2);
        for page in pages {
            chunks.push(Self::page_header(page.number));
            if !page.text.is_empty() {
                chunks.push(page.text.clone());
            }
        }
        chunks.join("\n")
    }

    /// Serialize a paged document
    ///
    /// # Errors
    /// Returns [`DoctextError::FormatError`] if the document is not paged.
    pub fn serialize_document(&self, doc: &Document) -> Result<String, DoctextError> {
        let pages = doc.pages().ok_or_else(|| {
            DoctextError::FormatError(format!(
                "Page dump requires a paged document, got {}",
                doc.format
            ))
        })?;
        Ok(self.serialize_pages(pages))
    }
}
