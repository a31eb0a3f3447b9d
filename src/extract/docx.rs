use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::error::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the body paragraphs of a word-processor document, in document order.
///
/// Only paragraphs that sit directly in the document body are returned;
/// table cells and text boxes are not walked.
pub fn read_paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::MalformedDocument(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::MalformedDocument(format!("{}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::MalformedDocument(e.to_string()))?;

    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::MalformedDocument(e.to_string()))?;

        match event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if name == b"w:p" && parent_is_body(&stack) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:p" if parent_is_body(&stack) => paragraphs.push(String::new()),
                    b"w:tab" if in_body_run(&stack) => push_text(&mut current, "\t"),
                    b"w:br" | b"w:cr" if in_body_run(&stack) => push_text(&mut current, "\n"),
                    _ => {}
                }
            }
            Event::Text(e) => {
                if last_is(&stack, b"w:t") && in_body_paragraph(&stack) {
                    let text = e
                        .unescape()
                        .map_err(|e| ExtractionError::MalformedDocument(e.to_string()))?;
                    push_text(&mut current, &text);
                }
            }
            Event::End(_) => {
                let name = stack.pop();
                if name.as_deref() == Some(b"w:p".as_slice()) && parent_is_body(&stack) {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn last_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().is_some_and(|last| last.as_slice() == name)
}

fn parent_is_body(stack: &[Vec<u8>]) -> bool {
    last_is(stack, b"w:body")
}

/// True while inside a body paragraph and not inside a paragraph nested in it.
fn in_body_paragraph(stack: &[Vec<u8>]) -> bool {
    let Some(body) = stack.iter().position(|name| name.as_slice() == b"w:body") else {
        return false;
    };
    let below = &stack[body + 1..];
    below.first().is_some_and(|first| first.as_slice() == b"w:p")
        && below.iter().filter(|name| name.as_slice() == b"w:p").count() == 1
}

/// True when the innermost open element is a run of a body paragraph.
/// Tab stops in `w:pPr/w:tabs` also use `w:tab` and must not produce text.
fn in_body_run(stack: &[Vec<u8>]) -> bool {
    last_is(stack, b"w:r") && in_body_paragraph(stack)
}

fn push_text(current: &mut Option<String>, text: &str) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push_str(text);
    }
}
