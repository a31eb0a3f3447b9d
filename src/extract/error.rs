use thiserror::Error;

/// Failure modes of the extraction dispatcher.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type")]
    UnsupportedType,

    #[error("File is not valid UTF-8 text: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("Could not read document: {0}")]
    MalformedDocument(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("No text extracted")]
    NoTextFound,

    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}
