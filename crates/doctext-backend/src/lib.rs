//! Text extraction backends for doctext
//!
//! This crate turns PDF and DOCX files into ordered [`Document`]s: pages for
//! PDF, body paragraphs for DOCX.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               DocumentConverter               │
//! │    (format detection, dispatch, timing)       │
//! └───────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │            DocumentBackend trait              │
//! └───────────────────────────────────────────────┘
//!             │                        │
//!             ▼                        ▼
//!      ┌─────────────┐          ┌─────────────┐
//!      │ PdfBackend  │          │ DocxBackend │
//!      │  (lopdf)    │          │ (zip + xml) │
//!      └─────────────┘          └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use doctext_backend::DocumentConverter;
//!
//! let result = DocumentConverter::new().convert("report.docx")?;
//! for paragraph in result.document.paragraphs().unwrap_or_default() {
//!     println!("{}: {}", paragraph.index, paragraph.text);
//! }
//! # Ok::<(), doctext_core::DoctextError>(())
//! ```
//!
//! [`Document`]: doctext_core::Document

pub mod converter;
pub mod docx;
pub mod pdf;
pub mod traits;

pub use converter::DocumentConverter;
pub use docx::DocxBackend;
pub use pdf::PdfBackend;
pub use traits::{BackendOptions, DocumentBackend};
