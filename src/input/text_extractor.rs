//! Text extraction from resume document formats

use crate::error::{Result, ResumeFitError};
use pulldown_cmark::{Event, Parser, Tag};
use std::io::{Cursor, Read};

/// Upper bound on the decompressed size of `word/document.xml`.
const MAX_DOCX_XML_BYTES: u64 = 50 * 1024 * 1024;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeFitError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })
    }
}

/// Reads `word/document.xml` and joins the `w:t` runs, one line per paragraph.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ResumeFitError::DocxExtraction(format!("Not a valid DOCX archive: {}", e)))?;

        let entry = archive.by_name("word/document.xml").map_err(|e| {
            ResumeFitError::DocxExtraction(format!("word/document.xml not found: {}", e))
        })?;

        let mut xml = Vec::new();
        entry
            .take(MAX_DOCX_XML_BYTES)
            .read_to_end(&mut xml)
            .map_err(|e| ResumeFitError::DocxExtraction(e.to_string()))?;
        if xml.len() as u64 >= MAX_DOCX_XML_BYTES {
            return Err(ResumeFitError::DocxExtraction(
                "word/document.xml exceeds size limit".to_string(),
            ));
        }

        paragraphs_from_document_xml(&xml)
    }
}

fn paragraphs_from_document_xml(xml: &[u8]) -> Result<String> {
    use quick_xml::events::Event as XmlEvent;

    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(XmlEvent::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(XmlEvent::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let paragraph = current.trim().to_string();
                    if !paragraph.is_empty() {
                        paragraphs.push(paragraph);
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(XmlEvent::Empty(e)) if e.local_name().as_ref() == b"tab" => current.push('\t'),
            Ok(XmlEvent::Text(text)) if in_text => {
                let unescaped = text
                    .unescape()
                    .map_err(|e| ResumeFitError::DocxExtraction(e.to_string()))?;
                current.push_str(&unescaped);
            }
            Ok(XmlEvent::Eof) => break,
            Err(e) => return Err(ResumeFitError::DocxExtraction(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let trailing = current.trim();
    if !trailing.is_empty() {
        paragraphs.push(trailing.to_string());
    }

    Ok(paragraphs.join("\n"))
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = String::from_utf8_lossy(bytes);
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

/// Renders Markdown down to its text content, one line per block.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown = PlainTextExtractor.extract(bytes)?;
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for event in Parser::new(&markdown) {
            match event {
                Event::Text(text) | Event::Code(text) => current.push_str(&text),
                Event::SoftBreak | Event::HardBreak => current.push(' '),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_))
                | Event::End(Tag::TableCell) => {
                    let line = current.trim().to_string();
                    if !line.is_empty() {
                        lines.push(line);
                    }
                    current.clear();
                }
                _ => {}
            }
        }

        let trailing = current.trim();
        if !trailing.is_empty() {
            lines.push(trailing.to_string());
        }

        Ok(lines.join("\n"))
    }
}
