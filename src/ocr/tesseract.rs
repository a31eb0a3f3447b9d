use std::io::Cursor;
use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use image::{GrayImage, ImageFormat};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use super::interface::OcrInterface;
use crate::config::OcrConfig;

/// OCR through the `tesseract` command line tool.
///
/// The image is piped in as PNG and the recognized text is read back from
/// stdout, so nothing touches the filesystem.
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(binary: String, language: String) -> Self {
        info!("Initialized TesseractOcr: binary={}, language={}", binary, language);
        Self { binary, language }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.binary.clone(), config.language.clone())
    }
}

#[async_trait]
impl OcrInterface for TesseractOcr {
    async fn recognize(&self, image: &GrayImage) -> Result<String, anyhow::Error> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("Failed to encode image for OCR")?;

        debug!(
            "Running {} on {}x{} image",
            self.binary,
            image.width(),
            image.height()
        );

        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start {}", self.binary))?;

        let mut stdin = child
            .stdin
            .take()
            .context("OCR process has no stdin")?;
        stdin.write_all(&png).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
