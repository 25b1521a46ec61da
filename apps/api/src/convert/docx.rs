//! Plain-text extraction from word-processor documents.
//!
//! A `.docx` file is a ZIP container; the document body lives in
//! `word/document.xml`. Extraction collects the text runs (`<w:t>` nodes) and
//! emits a line break at each paragraph end, which is all the downstream
//! text rasterizer and oracle prompts need. Styling, tables and headers are
//! flattened into plain text.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ConvertError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ConvertError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ConvertError::Decode(format!("not a valid docx container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ConvertError::Decode(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ConvertError::Decode(format!("failed to read {DOCUMENT_PART}: {e}")))?;

    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> Result<String, ConvertError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:br" => text.push('\n'),
            Ok(Event::Text(t)) if in_text_run => {
                let content = t
                    .unescape()
                    .map_err(|e| ConvertError::Decode(format!("malformed document xml: {e}")))?;
                text.push_str(&content);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ConvertError::Decode(format!("malformed document xml: {e}")));
            }
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_with_document_xml(xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_paragraphs_as_lines() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
                <w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;
        let bytes = docx_with_document_xml(xml);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "Jane Doe\nSenior Engineer\n");
    }

    #[test]
    fn test_line_breaks_within_paragraph() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>first</w:t></w:r><w:br/><w:r><w:t>second</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let bytes = docx_with_document_xml(xml);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_unescapes_entities() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>R&amp;D</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let bytes = docx_with_document_xml(xml);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "R&D\n");
    }

    #[test]
    fn test_non_zip_input_is_decode_error() {
        let err = extract_docx_text(b"plainly not a zip archive").unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn test_zip_without_document_part_is_decode_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("unrelated.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_docx_text(&bytes).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }
}
