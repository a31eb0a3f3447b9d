use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{TranslateRequest, TranslatorInterface};
use crate::config::TranslationConfig;

/// Client for Google's public `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(base_url: String) -> Self {
        info!("Initialized GoogleTranslator: base_url={}", base_url);
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(config.base_url.clone())
    }
}

#[async_trait]
impl TranslatorInterface for GoogleTranslator {
    async fn translate(&self, request: &TranslateRequest) -> Result<String> {
        let url = format!("{}/translate_a/single", self.base_url);
        debug!(
            "Translating {} chars {} -> {}",
            request.text.chars().count(),
            request.source_lang,
            request.target_lang
        );

        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", request.source_lang.as_str()),
                ("tl", request.target_lang.as_str()),
                ("dt", "t"),
            ])
            .form(&[("q", request.text.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Translation backend returned {}: {}", status, body);
            anyhow::bail!("Translation service returned {}", status);
        }

        let json: Value = serde_json::from_str(&body)?;
        parse_segments(&json)
    }
}

/// Concatenate the translated segments found at `[0][*][0]`.
fn parse_segments(json: &Value) -> Result<String> {
    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow::anyhow!("Invalid translation response: missing segments"))?;

    let translation: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    Ok(translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_all_segments() {
        let body = json!([
            [
                ["नमस्ते। ", "Hello. ", null, null, 10],
                ["आप कैसे हैं?", "How are you?", null, null, 10]
            ],
            null,
            "en"
        ]);
        assert_eq!(parse_segments(&body).unwrap(), "नमस्ते। आप कैसे हैं?");
    }

    #[test]
    fn skips_segments_without_text() {
        let body = json!([[["Bonjour", "Hello"], [null, null, "bon-zhoor"]], null, "en"]);
        assert_eq!(parse_segments(&body).unwrap(), "Bonjour");
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(parse_segments(&json!({"error": "nope"})).is_err());
        assert!(parse_segments(&json!([null])).is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let translator = GoogleTranslator::new("http://localhost:9999/".to_string());
        assert_eq!(translator.base_url, "http://localhost:9999");
    }
}
