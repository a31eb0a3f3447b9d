use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source language sent to the backend; detection is left to it.
pub const AUTO_DETECT: &str = "auto";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslateRequest {
    pub fn auto_detect(text: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: AUTO_DETECT.to_string(),
            target_lang: target_lang.into(),
        }
    }
}

/// Translate interface - the remote translation backend
#[async_trait]
pub trait TranslatorInterface: Send + Sync {
    /// Translate `request.text` and return the translated string.
    ///
    /// Errors carry the backend's own message.
    async fn translate(&self, request: &TranslateRequest) -> Result<String, anyhow::Error>;
}
