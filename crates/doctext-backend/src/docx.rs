//! DOCX (Microsoft Word) document parser
//!
//! # Architecture
//!
//! Manual ZIP + XML parsing. DOCX files are ZIP archives containing:
//! - `word/document.xml`: Main content (paragraphs, tables, etc.)
//! - `docProps/core.xml`: Metadata (title, author, created date, modified date)
//!
//! Only body paragraphs are extracted: `w:p` elements that are direct
//! children of `w:body`. Paragraphs inside tables, text boxes and block
//! content controls are skipped. Paragraph text comes from runs placed
//! directly in the paragraph or in a hyperlink; runs wrapped in revision
//! marks (`w:ins`, `w:del`), simple fields or smart tags are left out.
use crate::traits::{BackendOptions, DocumentBackend};
use chrono::{DateTime, Utc};
use doctext_core::{Content, DoctextError, Document, DocumentMetadata, InputFormat, Paragraph};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Extract an attribute value by key from an element
#[inline]
fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Paragraph being assembled while its `w:p` element is open
#[derive(Debug, Default)]
struct ParagraphBuilder {
    text: String,
    style: Option<String>,
}

/// State for the single pass over `word/document.xml`
#[derive(Debug, Default)]
struct WalkBodyState {
    /// Names of the currently open elements, outermost first
    open: Vec<Vec<u8>>,
    /// Number of open `w:p` elements (nested ones come from text boxes)
    paragraph_depth: usize,
    /// Body paragraph currently being collected
    current: Option<ParagraphBuilder>,
    /// Stack depth of the open run whose content is paragraph text
    run_level: Option<usize>,
    /// Inside a `w:t` of the current paragraph
    in_text: bool,
    paragraphs: Vec<Paragraph>,
}

impl WalkBodyState {
    fn parent_is(&self, name: &[u8]) -> bool {
        self.open.last().is_some_and(|parent| parent.as_slice() == name)
    }

    fn grandparent_is(&self, name: &[u8]) -> bool {
        self.open
            .len()
            .checked_sub(2)
            .and_then(|i| self.open.get(i))
            .is_some_and(|e| e.as_slice() == name)
    }

    /// True while the cursor is inside a body paragraph and not inside a
    /// paragraph nested within it
    fn collecting(&self) -> bool {
        self.current.is_some() && self.paragraph_depth == 1
    }

    /// Only runs directly in the paragraph or in a top-level hyperlink carry
    /// paragraph text; runs in `w:ins`, `w:fldSimple`, `w:smartTag` do not
    fn run_is_text(&self) -> bool {
        self.collecting()
            && (self.parent_is(b"w:p") || (self.parent_is(b"w:hyperlink") && self.grandparent_is(b"w:p")))
    }

    /// Direct child of a text-carrying run
    fn in_run(&self) -> bool {
        self.collecting() && self.run_level.is_some() && self.parent_is(b"w:r")
    }

    fn push_char(&mut self, c: char) {
        if let Some(p) = self.current.as_mut() {
            p.text.push(c);
        }
    }

    fn finish_paragraph(&mut self, builder: ParagraphBuilder) {
        self.paragraphs.push(Paragraph {
            index: self.paragraphs.len(),
            text: builder.text,
            style: builder.style,
        });
    }

    fn handle_start_element(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:p" => {
                let is_body_paragraph = self.parent_is(b"w:body") && self.paragraph_depth == 0;
                self.paragraph_depth += 1;
                if is_body_paragraph {
                    self.current = Some(ParagraphBuilder::default());
                }
            }
            b"w:r" => {
                if self.run_is_text() {
                    self.run_level = Some(self.open.len());
                }
            }
            b"w:t" => {
                if self.in_run() {
                    self.in_text = true;
                }
            }
            _ => self.handle_inline_element(e),
        }
        self.open.push(e.name().as_ref().to_vec());
    }

    fn handle_empty_element(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            // <w:p/> is a blank paragraph, it still takes an index
            b"w:p" => {
                if self.parent_is(b"w:body") && self.paragraph_depth == 0 {
                    self.finish_paragraph(ParagraphBuilder::default());
                }
            }
            _ => self.handle_inline_element(e),
        }
    }

    /// Elements whose meaning does not depend on having children; writers
    /// emit them both as `<w:tab/>` and `<w:tab></w:tab>`
    fn handle_inline_element(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:tab" | b"w:ptab" => {
                if self.in_run() {
                    self.push_char('\t');
                }
            }
            b"w:br" => {
                // Page and column breaks are layout, not text
                let wraps = get_attr(e, b"w:type").map_or(true, |t| t == "textWrapping");
                if wraps && self.in_run() {
                    self.push_char('\n');
                }
            }
            b"w:cr" => {
                if self.in_run() {
                    self.push_char('\n');
                }
            }
            b"w:noBreakHyphen" => {
                if self.in_run() {
                    self.push_char('-');
                }
            }
            b"w:pStyle" => {
                if self.collecting() && self.parent_is(b"w:pPr") {
                    if let Some(p) = self.current.as_mut() {
                        p.style = get_attr(e, b"w:val");
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_text_event(&mut self, text: &str) {
        if self.in_text {
            if let Some(p) = self.current.as_mut() {
                p.text.push_str(text);
            }
        }
    }

    fn handle_end_element(&mut self, name: &[u8]) {
        self.open.pop();
        match name {
            b"w:t" => self.in_text = false,
            b"w:r" => {
                if self.run_level == Some(self.open.len()) {
                    self.run_level = None;
                }
            }
            b"w:p" => {
                self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
                if self.paragraph_depth == 0 {
                    if let Some(builder) = self.current.take() {
                        self.finish_paragraph(builder);
                    }
                }
            }
            _ => {}
        }
    }

    fn into_paragraphs(self) -> Vec<Paragraph> {
        self.paragraphs
    }
}

/// DOCX backend for extracting paragraphs from Microsoft Word documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxBackend;

impl DocumentBackend for DocxBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Docx
    }

    fn parse_bytes(&self, data: &[u8], _options: &BackendOptions) -> Result<Document, DoctextError> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| DoctextError::BackendError(format!("Failed to open DOCX as ZIP: {e}")))?;
        Self::parse_archive(&mut archive)
    }

    fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
        _options: &BackendOptions,
    ) -> Result<Document, DoctextError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(DoctextError::IoError)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| DoctextError::BackendError(format!("Failed to open DOCX as ZIP: {e}")))?;
        debug!("Opened DOCX {} ({} parts)", path.display(), archive.len());
        Self::parse_archive(&mut archive)
    }
}

impl DocxBackend {
    fn parse_archive<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Document, DoctextError> {
        let xml_content = Self::read_part(archive, "word/document.xml")?.ok_or_else(|| {
            DoctextError::BackendError("Missing word/document.xml".to_string())
        })?;

        let paragraphs = Self::walk_body(&xml_content)?;
        debug!("Found {} body paragraphs", paragraphs.len());

        let metadata = Self::read_part(archive, "docProps/core.xml")
            .ok()
            .flatten()
            .map(|xml| Self::extract_core_metadata(&xml))
            .unwrap_or_default();

        Ok(Document::new(
            InputFormat::Docx,
            metadata,
            Content::Paragraphs(paragraphs),
        ))
    }

    /// Read a part of the package as UTF-8; `Ok(None)` if it does not exist
    fn read_part<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        name: &str,
    ) -> Result<Option<String>, DoctextError> {
        let Ok(mut part) = archive.by_name(name) else {
            return Ok(None);
        };

        let mut content = String::new();
        part.read_to_string(&mut content)
            .map_err(DoctextError::IoError)?;
        Ok(Some(content))
    }

    /// Walk `word/document.xml` and collect body paragraphs in document order
    fn walk_body(xml_content: &str) -> Result<Vec<Paragraph>, DoctextError> {
        let mut state = WalkBodyState::default();

        let mut reader = Reader::from_str(xml_content);
        // Don't trim text: runs with xml:space="preserve" carry significant spaces
        reader.trim_text(false);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => state.handle_start_element(&e),
                Ok(Event::Empty(e)) => state.handle_empty_element(&e),
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| {
                        DoctextError::XmlError(format!("Invalid text in document.xml: {e}"))
                    })?;
                    state.handle_text_event(&text);
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e);
                    state.handle_text_event(&text);
                }
                Ok(Event::End(e)) => state.handle_end_element(e.name().as_ref()),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DoctextError::XmlError(format!(
                        "Error parsing document.xml at position {}: {e}",
                        reader.buffer_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(state.into_paragraphs())
    }

    /// Extract title, author, subject and dates from docProps/core.xml
    ///
    /// Example XML:
    /// ```xml
    /// <dc:title>Questionnaire</dc:title>
    /// <dc:creator>John Doe</dc:creator>
    /// <dcterms:created xsi:type="dcterms:W3CDTF">2024-01-15T10:30:00Z</dcterms:created>
    /// ```
    fn extract_core_metadata(xml_content: &str) -> DocumentMetadata {
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current: Option<Vec<u8>> = None;
        let mut metadata = DocumentMetadata::default();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => current = Some(e.name().as_ref().to_vec()),
                Ok(Event::Text(e)) => {
                    if let Ok(text) = e.unescape() {
                        let text = text.trim();
                        match current.as_deref() {
                            _ if text.is_empty() => {}
                            Some(b"dc:title") => metadata.title = Some(text.to_string()),
                            Some(b"dc:creator") => metadata.author = Some(text.to_string()),
                            Some(b"dc:subject") => metadata.subject = Some(text.to_string()),
                            Some(b"dcterms:created") => {
                                metadata.created = Self::parse_datetime(text);
                            }
                            Some(b"dcterms:modified") => {
                                metadata.modified = Self::parse_datetime(text);
                            }
                            _ => {}
                        }
                    }
                }
                Ok(Event::End(_)) => current = None,
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
            buf.clear();
        }

        metadata
    }

    /// Parse a W3CDTF (RFC 3339) timestamp such as `2024-01-15T10:30:00Z`
    #[inline]
    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
