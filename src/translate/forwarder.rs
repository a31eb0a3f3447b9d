use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use super::{TranslateRequest, TranslatorInterface};

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("No text provided")]
    EmptyText,

    /// The backend failed; carries its message unchanged.
    #[error("{0}")]
    Downstream(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
}

/// Hands text to the translation backend, one call per request.
pub struct TranslationForwarder {
    translator: Arc<dyn TranslatorInterface>,
    default_target_lang: String,
}

impl TranslationForwarder {
    pub fn new(translator: Arc<dyn TranslatorInterface>, default_target_lang: String) -> Self {
        Self {
            translator,
            default_target_lang,
        }
    }

    /// Translate `text` into `target_lang`, or the default target when `None`.
    ///
    /// The source language is always auto-detected by the backend. Blank
    /// text is rejected without calling out; there is no retry or caching.
    pub async fn translate(
        &self,
        text: &str,
        target_lang: Option<&str>,
    ) -> Result<TranslationResult, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyText);
        }

        let target_lang = target_lang.unwrap_or(self.default_target_lang.as_str());
        let request = TranslateRequest::auto_detect(text, target_lang);
        debug!("Forwarding translation to {}", request.target_lang);

        match self.translator.translate(&request).await {
            Ok(translated_text) => Ok(TranslationResult {
                original_text: request.text,
                translated_text,
            }),
            Err(e) => {
                error!("Translation failed: {}", e);
                Err(TranslationError::Downstream(e.to_string()))
            }
        }
    }
}
