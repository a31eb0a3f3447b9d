use async_trait::async_trait;
use image::GrayImage;

/// OCR interface trait - turns a preprocessed bitmap into text
#[async_trait]
pub trait OcrInterface: Send + Sync {
    /// Recognize the text in `image`.
    async fn recognize(&self, image: &GrayImage) -> Result<String, anyhow::Error>;
}
