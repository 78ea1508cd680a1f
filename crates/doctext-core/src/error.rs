//! Error types for document extraction operations.
//!
//! This module defines the error types that can occur while opening a
//! document, extracting its text, or serializing the result.

use thiserror::Error;

/// Error types that can occur during text extraction.
///
/// # Examples
///
/// ```rust,ignore
/// // Note: DocumentConverter is in doctext-backend crate
/// use doctext_backend::DocumentConverter;
/// use doctext_core::DoctextError;
///
/// let converter = DocumentConverter::new();
///
/// match converter.convert("report.pdf") {
///     Ok(result) => println!("{} pages", result.document.unit_count()),
///     Err(DoctextError::IoError(e)) => eprintln!("File error: {}", e),
///     Err(DoctextError::FormatError(msg)) => eprintln!("Unsupported format: {}", msg),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DoctextError {
    /// File I/O error.
    ///
    /// Reading the input document or writing the output file failed
    /// (file not found, permission denied, disk full).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Format detection or unsupported format error.
    ///
    /// The file extension is missing or names a format no backend handles,
    /// or a serializer was given a document of the wrong shape.
    #[error("Format detection error: {0}")]
    FormatError(String),

    /// Backend-specific error.
    ///
    /// The document container was readable but its contents were not
    /// (missing `word/document.xml`, encrypted PDF, broken ZIP).
    #[error("Backend error: {0}")]
    BackendError(String),

    /// PDF object model error reported by the PDF parser.
    #[error("PDF error: {0}")]
    PdfError(String),

    /// Malformed XML inside an Office package.
    #[error("XML error: {0}")]
    XmlError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Catch-all for errors raised through `anyhow` by helper code.
    #[error("Parser error: {0}")]
    ParserError(#[from] anyhow::Error),
}

/// Result type alias for doctext operations.
pub type Result<T> = std::result::Result<T, DoctextError>;
