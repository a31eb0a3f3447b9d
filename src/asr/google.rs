use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::interface::ASRInterface;
use super::PcmAudio;
use crate::config::SpeechConfig;

/// Client for the Google web speech API (`speech-api/v2/recognize`).
pub struct GoogleSpeechRecognizer {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    language: String,
}

impl GoogleSpeechRecognizer {
    pub fn new(base_url: String, api_key: Option<String>, language: String) -> Self {
        info!(
            "Initialized GoogleSpeechRecognizer: base_url={}, language={}",
            base_url, language
        );
        Self {
            client: Client::new(),
            base_url,
            api_key,
            language,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.language.clone(),
        )
    }
}

#[async_trait]
impl ASRInterface for GoogleSpeechRecognizer {
    async fn recognize(&self, audio: &PcmAudio) -> Result<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Speech recognition API key is not configured"))?;

        debug!("Sending {} samples to speech API", audio.samples.len());
        let response = self
            .client
            .post(&self.base_url)
            .query(&[
                ("client", "chromium"),
                ("lang", self.language.as_str()),
                ("key", api_key),
            ])
            .header(
                CONTENT_TYPE,
                format!("audio/l16; rate={}", audio.sample_rate),
            )
            .body(audio.to_l16_be())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Speech API returned {}: {}", status, body);
            anyhow::bail!("Speech recognition service returned {}", status);
        }

        Ok(parse_transcript(&body))
    }
}

/// The API answers with one JSON object per line, usually starting with an
/// empty `{"result":[]}`. Take the first result that has alternatives,
/// preferring the alternative that carries a confidence score.
fn parse_transcript(body: &str) -> Option<String> {
    for line in body.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Ok(json) = serde_json::from_str::<Value>(line) else {
            debug!("Skipping unparseable speech API line: {}", line);
            continue;
        };

        let Some(alternatives) = json
            .pointer("/result/0/alternative")
            .and_then(Value::as_array)
        else {
            continue;
        };

        let best = alternatives
            .iter()
            .find(|alt| alt.get("confidence").is_some())
            .or_else(|| alternatives.first());

        if let Some(transcript) = best
            .and_then(|alt| alt.get("transcript"))
            .and_then(Value::as_str)
        {
            return Some(transcript.to_string());
        }
    }

    None
}
