use lopdf::Document;
use tracing::debug;

use super::error::ExtractionError;

/// Extract the text of every page, in page order.
///
/// Pages without extractable text contribute nothing; every other page is
/// followed by a single newline.
pub fn read_pages(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document =
        Document::load_mem(bytes).map_err(|e| ExtractionError::MalformedDocument(e.to_string()))?;

    let pages = document.get_pages();
    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = match document.extract_text(&[*page_number]) {
            Ok(page_text) => page_text,
            Err(e) => {
                debug!("No text on page {}: {}", page_number, e);
                continue;
            }
        };
        append_page(&mut text, &page_text);
    }

    Ok(text)
}

fn append_page(text: &mut String, page_text: &str) {
    let page_text = page_text.trim_end_matches(['\r', '\n']);
    if page_text.trim().is_empty() {
        return;
    }
    text.push_str(page_text);
    text.push('\n');
}
