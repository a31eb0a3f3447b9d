use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use super::error::ExtractionError;
use super::kind::FileKind;
use super::{docx, image, pdf};
use crate::ocr::OcrInterface;

/// Text pulled out of an upload or supplied directly by a caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedText {
    pub content: String,
    pub non_empty_after_trim: bool,
}

impl From<String> for ExtractedText {
    fn from(content: String) -> Self {
        let non_empty_after_trim = !content.trim().is_empty();
        Self {
            content,
            non_empty_after_trim,
        }
    }
}

/// Picks an extraction strategy from the file name and turns bytes into text.
pub struct Extractor {
    ocr: Arc<dyn OcrInterface>,
}

impl Extractor {
    pub fn new(ocr: Arc<dyn OcrInterface>) -> Self {
        Self { ocr }
    }

    /// Extract the text of `content`, dispatching on the suffix of `filename`.
    ///
    /// Unknown suffixes are rejected before any bytes are inspected, and a
    /// result that is blank after trimming is reported as
    /// [`ExtractionError::NoTextFound`]. Parsing and image preparation run on
    /// the blocking pool.
    pub async fn extract(
        &self,
        filename: &str,
        content: Bytes,
    ) -> Result<ExtractedText, ExtractionError> {
        let kind = FileKind::from_filename(filename)
            .ok_or(ExtractionError::UnsupportedType)?;

        debug!(
            "Extracting {} ({:?}, {} bytes)",
            filename,
            kind,
            content.len()
        );

        let text = match kind {
            FileKind::PlainText => {
                run_blocking(move || Ok(std::str::from_utf8(&content)?.to_string())).await?
            }
            FileKind::WordDoc => run_blocking(move || {
                Ok(docx::read_paragraphs(&content)?
                    .into_iter()
                    .map(|paragraph| paragraph + "\n")
                    .collect::<String>())
            })
            .await?,
            FileKind::Pdf => run_blocking(move || pdf::read_pages(&content)).await?,
            FileKind::Image => self.recognize_image(content).await?,
        };

        let extracted = ExtractedText::from(text);
        if !extracted.non_empty_after_trim {
            return Err(ExtractionError::NoTextFound);
        }
        Ok(extracted)
    }

    async fn recognize_image(&self, content: Bytes) -> Result<String, ExtractionError> {
        let prepared = run_blocking(move || {
            let decoded = image::decode(&content)?;
            Ok(image::prepare_for_ocr(decoded, &mut |stage, _| {
                debug!("Applied image stage {:?}", stage);
            }))
        })
        .await?;

        self.ocr
            .recognize(&prepared)
            .await
            .map_err(|e| ExtractionError::OcrFailed(e.to_string()))
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, ExtractionError>
where
    F: FnOnce() -> Result<T, ExtractionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ExtractionError::TaskFailed(e.to_string()))?
}
