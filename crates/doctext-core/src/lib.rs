//! # doctext core
//!
//! Document types, input formats, errors and output layouts shared by the
//! doctext backends and command-line tool.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // Note: DocumentConverter is in doctext-backend crate
//! use doctext_backend::DocumentConverter;
//! use doctext_core::{PageDumpSerializer, Result};
//!
//! fn main() -> Result<()> {
//!     let converter = DocumentConverter::new();
//!     let result = converter.convert("report.pdf")?;
//!
//!     println!("Pages: {:?}", result.document.metadata.num_pages);
//!     let dump = PageDumpSerializer::new().serialize_document(&result.document)?;
//!     std::fs::write("pdf_dump.txt", dump)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - Extracted document, pages, paragraphs and metadata
//! - [`mod@format`] - Input format detection
//! - [`serializer`] - Page dump, paragraph listing and JSON layouts
//! - [`error`] - Error types and handling

pub mod document;
pub mod error;
pub mod format;
pub mod serializer;

// Re-exports for convenience
pub use document::*;
pub use error::*;
pub use format::*;
pub use serializer::*;
