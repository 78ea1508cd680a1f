//! Document types produced by the extraction backends.
//!
//! A [`Document`] is an ordered sequence of text units: pages for PDF,
//! body paragraphs for DOCX. Backends never reorder units, so index `i` of
//! [`Content`] is always the `i`-th unit of the source file.

use crate::format::InputFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One page of a PDF document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number, as shown in PDF viewers
    pub number: usize,
    /// Extracted text (empty for pages without a text layer)
    pub text: String,
}

impl Page {
    /// Create a page from its 1-based number and extracted text
    #[inline]
    #[must_use]
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// One body paragraph of a word-processing document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Paragraph {
    /// 0-based position among all body paragraphs (blank ones included)
    pub index: usize,
    /// Paragraph text with tabs and line breaks preserved
    pub text: String,
    /// Paragraph style id (`w:pStyle`), if the paragraph sets one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Paragraph {
    /// Create an unstyled paragraph
    #[inline]
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            style: None,
        }
    }

    /// Set the paragraph style id
    #[inline]
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// True when the paragraph has no visible text
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered text units of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    /// PDF pages, in page order
    Pages(Vec<Page>),
    /// DOCX body paragraphs, in document order
    Paragraphs(Vec<Paragraph>),
}

impl Content {
    /// Number of units (pages or paragraphs)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Pages(pages) => pages.len(),
            Self::Paragraphs(paragraphs) => paragraphs.len(),
        }
    }

    /// True when the document has no units at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over unit texts in source order
    pub fn texts(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Pages(pages) => Box::new(pages.iter().map(|p| p.text.as_str())),
            Self::Paragraphs(paragraphs) => Box::new(paragraphs.iter().map(|p| p.text.as_str())),
        }
    }
}

/// Document metadata.
///
/// All fields except `num_characters` are optional as not every file
/// carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Total number of pages in the source file (PDF only). May exceed the
    /// number of extracted pages when a page limit was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<usize>,

    /// Total character count of the extracted text
    #[serde(default)]
    pub num_characters: usize,

    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author(s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Document subject/description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,

    /// Last modified date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Text extracted from one input file.
///
/// # Examples
///
/// ```
/// use doctext_core::{Content, Document, DocumentMetadata, InputFormat, Page};
///
/// let doc = Document::new(
///     InputFormat::Pdf,
///     DocumentMetadata::default(),
///     Content::Pages(vec![Page::new(1, "Hello"), Page::new(2, "World")]),
/// );
///
/// assert_eq!(doc.unit_count(), 2);
/// assert_eq!(doc.plain_text(), "Hello\nWorld");
/// assert_eq!(doc.metadata.num_characters, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    /// Input format of the source file
    pub format: InputFormat,

    /// Document metadata
    pub metadata: DocumentMetadata,

    /// Extracted units
    pub content: Content,
}

impl Document {
    /// Assemble a document; `num_characters` is recomputed from `content`.
    #[must_use]
    pub fn new(format: InputFormat, mut metadata: DocumentMetadata, content: Content) -> Self {
        metadata.num_characters = content.texts().map(|t| t.chars().count()).sum();
        Self {
            format,
            metadata,
            content,
        }
    }

    /// Number of extracted units (pages or paragraphs)
    #[inline]
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.content.len()
    }

    /// Extracted pages, if this is a paged document
    #[inline]
    #[must_use]
    pub fn pages(&self) -> Option<&[Page]> {
        match &self.content {
            Content::Pages(pages) => Some(pages),
            Content::Paragraphs(_) => None,
        }
    }

    /// Extracted paragraphs, if this is a flowing-text document
    #[inline]
    #[must_use]
    pub fn paragraphs(&self) -> Option<&[Paragraph]> {
        match &self.content {
            Content::Paragraphs(paragraphs) => Some(paragraphs),
            Content::Pages(_) => None,
        }
    }

    /// All unit texts joined with a newline, in source order
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.content.texts().collect::<Vec<_>>().join("\n")
    }
}

/// Result of converting a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// The extracted document
    pub document: Document,
    /// Time taken to open and extract the file
    pub latency: Duration,
}
