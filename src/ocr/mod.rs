pub mod interface;
pub mod tesseract;

pub use interface::OcrInterface;
pub use tesseract::TesseractOcr;
