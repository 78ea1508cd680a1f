//! Fixture builders: small PDF and DOCX files generated at test time

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build a PDF with one page per entry; an empty entry yields a page
/// without any text operators.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    build_pdf_with_title(pages, None)
}

/// Build a PDF and optionally set `/Title` in the Info dictionary
pub fn build_pdf_with_title(pages: &[&str], title: Option<&str>) -> Vec<u8> {
    let pages = pages.iter().map(|t| text_operations(t)).collect();
    let mut doc = pdf_document(pages);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    save_pdf(&mut doc)
}

/// Build a PDF whose page `bad` (1-based) selects its font with a number
/// instead of a name, so its content cannot be interpreted
pub fn build_pdf_with_unreadable_page(pages: &[&str], bad: usize) -> Vec<u8> {
    let pages = pages
        .iter()
        .enumerate()
        .map(|(i, text)| {
            if i + 1 == bad {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec![12.into(), 12.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            } else {
                text_operations(text)
            }
        })
        .collect();
    save_pdf(&mut pdf_document(pages))
}

/// Build a PDF whose trailer points at a `/Encrypt` dictionary using a
/// security handler revision lopdf cannot decrypt
pub fn build_encrypted_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = pdf_document(pages.iter().map(|t| text_operations(t)).collect());
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 4,
        "R" => 4,
        "Length" => 128,
        "O" => Object::string_literal(vec![0u8; 32]),
        "U" => Object::string_literal(vec![0u8; 32]),
        "P" => -4,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    save_pdf(&mut doc)
}

fn text_operations(text: &str) -> Vec<Operation> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

/// Page tree with one Courier-resourced page per operation list
fn pdf_document(pages: Vec<Vec<Operation>>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let count = pages.len();
    let mut kids: Vec<Object> = Vec::with_capacity(count);
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn save_pdf(doc: &mut Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

/// Wrap body content in a `w:document`
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body}<w:sectPr/></w:body>
</w:document>"#
    )
}

/// A `w:p` with a single run holding `text`
pub fn paragraph(text: &str) -> String {
    if text.is_empty() {
        "<w:p/>".to_string()
    } else {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }
}

/// Build a DOCX package from raw body XML and an optional core.xml
pub fn build_docx(body: &str, core_xml: Option<&str>) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml(body).as_bytes()).unwrap();

    if let Some(core) = core_xml {
        zip.start_file("docProps/core.xml", options).unwrap();
        zip.write_all(core.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Build a DOCX with one simple paragraph per entry
pub fn build_docx_paragraphs(texts: &[&str]) -> Vec<u8> {
    let body: String = texts.iter().map(|t| paragraph(t)).collect();
    build_docx(&body, None)
}

/// Build a ZIP that is not a Word document
pub fn build_zip_without_document() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("readme.txt", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"hello").unwrap();
    zip.finish().unwrap().into_inner()
}
