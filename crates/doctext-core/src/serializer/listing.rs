//! Numbered paragraph listing
//!
//! Lists the non-blank paragraphs inside a window of the first `limit`
//! paragraphs as `index: text`, one per line. Indices count every paragraph,
//! so blank paragraphs leave gaps in the numbering.

use crate::document::{Document, Paragraph};
use crate::error::DoctextError;

/// Number of paragraphs listed when no limit is configured
pub const DEFAULT_LISTING_LIMIT: usize = 100;

/// Options for the paragraph listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingOptions {
    /// Only the first `limit` paragraphs are considered (None = all)
    pub limit: Option<usize>,
}

impl Default for ListingOptions {
    #[inline]
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_LISTING_LIMIT),
        }
    }
}

impl ListingOptions {
    /// Set the listing window
    #[inline]
    #[must_use = "returns options with the limit configured"]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Serializer producing the numbered paragraph listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParagraphListingSerializer {
    options: ListingOptions,
}

impl ParagraphListingSerializer {
    /// Create a serializer listing the first [`DEFAULT_LISTING_LIMIT`] paragraphs
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer with custom options
    #[inline]
    #[must_use]
    pub const fn with_options(options: ListingOptions) -> Self {
        Self { options }
    }

    /// Listing lines, without trailing newlines
    #[must_use]
    pub fn lines(&self, paragraphs: &[Paragraph]) -> Vec<String> {
        let window = self.options.limit.unwrap_or(paragraphs.len());
        paragraphs
            .iter()
            .take(window)
            .filter(|p| !p.is_blank())
            .map(|p| format!("{}: {}", p.index, p.text.trim()))
            .collect()
    }

    /// Listing with every line newline-terminated
    #[must_use]
    pub fn serialize_paragraphs(&self, paragraphs: &[Paragraph]) -> String {
        self.lines(paragraphs)
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }

    /// Serialize a paragraph document
    ///
    /// # Errors
    /// Returns [`DoctextError::FormatError`] if the document is paged.
    pub fn serialize_document(&self, doc: &Document) -> Result<String, DoctextError> {
        let paragraphs = doc.paragraphs().ok_or_else(|| {
            DoctextError::FormatError(format!(
                "Paragraph listing requires a paragraph document, got {}",
                doc.format
            ))
        })?;
        Ok(self.serialize_paragraphs(paragraphs))
    }
}
