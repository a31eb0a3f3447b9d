pub mod dispatcher;
pub mod docx;
pub mod error;
pub mod image;
pub mod kind;
pub mod pdf;

pub use dispatcher::Extractor;
pub use error::ExtractionError;
