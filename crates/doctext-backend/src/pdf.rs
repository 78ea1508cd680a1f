//! PDF backend
//!
//! Pages are enumerated through lopdf's page tree in page-number order and
//! each page's text is taken from `Document::extract_text`. Layout
//! reconstruction is left entirely to lopdf.

use crate::traits::{BackendOptions, DocumentBackend};
use doctext_core::{Content, DoctextError, Document, DocumentMetadata, InputFormat, Page};
use log::{debug, warn};
use lopdf::{Dictionary, Object};
use std::path::Path;

/// PDF backend using lopdf
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PdfBackend;

impl DocumentBackend for PdfBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Pdf
    }

    fn parse_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<Document, DoctextError> {
        let doc = lopdf::Document::load_mem(data).map_err(pdf_error)?;
        Self::extract(doc, options)
    }

    fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
        options: &BackendOptions,
    ) -> Result<Document, DoctextError> {
        let path = path.as_ref();
        // Surface a missing file as an I/O error rather than a parser error
        if !path.exists() {
            return Err(DoctextError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("No such file: {}", path.display()),
            )));
        }

        let doc = lopdf::Document::load(path).map_err(pdf_error)?;
        debug!("Loaded PDF {}", path.display());
        Self::extract(doc, options)
    }
}

impl PdfBackend {
    fn extract(mut doc: lopdf::Document, options: &BackendOptions) -> Result<Document, DoctextError> {
        if doc.is_encrypted() {
            // Most "encrypted" PDFs only carry an owner password
            doc.decrypt("").map_err(|e| {
                DoctextError::BackendError(format!("Encrypted PDF requires a password: {e}"))
            })?;
        }

        let page_tree = doc.get_pages();
        let total_pages = page_tree.len();
        let limit = options.max_pages.unwrap_or(total_pages);

        let mut pages = Vec::with_capacity(limit.min(total_pages));
        // BTreeMap iteration yields page numbers in ascending order
        for (&page_number, _) in page_tree.iter().take(limit) {
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to extract text from page {page_number}: {e}");
                    String::new()
                }
            };
            pages.push(Page::new(page_number as usize, text));
        }

        if pages.len() < total_pages {
            debug!("Extracted {} of {} pages", pages.len(), total_pages);
        }

        let mut metadata = Self::info_metadata(&doc);
        metadata.num_pages = Some(total_pages);

        Ok(Document::new(InputFormat::Pdf, metadata, Content::Pages(pages)))
    }

    /// Read Title/Author/Subject from the trailer's Info dictionary
    fn info_metadata(doc: &lopdf::Document) -> DocumentMetadata {
        let info = doc
            .trailer
            .get(b"Info")
            .ok()
            .and_then(|obj| match obj {
                Object::Reference(id) => doc.get_object(*id).ok(),
                other => Some(other),
            })
            .and_then(|obj| obj.as_dict().ok());

        let Some(info) = info else {
            debug!("No Info dictionary in PDF");
            return DocumentMetadata::default();
        };

        DocumentMetadata {
            title: info_string(info, b"Title"),
            author: info_string(info, b"Author"),
            subject: info_string(info, b"Subject"),
            ..DocumentMetadata::default()
        }
    }
}

fn pdf_error(e: lopdf::Error) -> DoctextError {
    DoctextError::PdfError(e.to_string())
}

fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    match info.get(key).ok()? {
        Object::String(bytes, _) => {
            let text = decode_pdf_string(bytes);
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    String::from_utf8(bytes.to_vec()).unwrap_or_else(|_| bytes.iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf16_string() {
        let bytes = [0xFE, 0xFF, 0x00, b'Q', 0x00, 0xE9];
        assert_eq!(decode_pdf_string(&bytes), "Qé");
    }

    #[test]
    fn test_decode_latin1_string() {
        assert_eq!(decode_pdf_string(&[b'C', b'a', b'f', 0xE9]), "Café");
    }

    #[test]
    fn test_decode_utf8_string() {
        assert_eq!(decode_pdf_string("Comptabilité".as_bytes()), "Comptabilité");
    }

    #[test]
    fn test_info_string_trims_and_skips_empty() {
        let mut info = Dictionary::new();
        info.set("Title", Object::string_literal("  Export compta  "));
        info.set("Author", Object::string_literal("   "));
        info.set("Subject", Object::Integer(42));
        assert_eq!(info_string(&info, b"Title").as_deref(), Some("Export compta"));
        assert_eq!(info_string(&info, b"Author"), None);
        assert_eq!(info_string(&info, b"Subject"), None);
        assert_eq!(info_string(&info, b"Keywords"), None);
    }

    #[test]
    fn test_parse_bytes_rejects_garbage() {
        let err = PdfBackend
            .parse_bytes(b"not a pdf", &BackendOptions::default())
            .unwrap_err();
        assert!(matches!(err, DoctextError::PdfError(_)));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = PdfBackend
            .parse_file("/nonexistent/report.pdf", &BackendOptions::default())
            .unwrap_err();
        assert!(matches!(err, DoctextError::IoError(_)));
    }
}
