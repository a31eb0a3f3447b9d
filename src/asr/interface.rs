use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error};

use super::PcmAudio;

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    #[error("Could not recognize speech")]
    NoSpeech,

    #[error("{0}")]
    Downstream(String),
}

/// ASR interface - remote speech-to-text backend
#[async_trait]
pub trait ASRInterface: Send + Sync {
    /// Recognize speech in `audio`. `Ok(None)` means nothing was understood.
    async fn recognize(&self, audio: &PcmAudio) -> Result<Option<String>, anyhow::Error>;
}

/// Decode an uploaded WAV file and run it through `recognizer`.
pub async fn transcribe(
    recognizer: &dyn ASRInterface,
    wav_bytes: &[u8],
) -> Result<String, RecognitionError> {
    let audio = PcmAudio::from_wav(wav_bytes)?;
    debug!(
        "Recognizing {} samples at {} Hz",
        audio.samples.len(),
        audio.sample_rate
    );

    match recognizer.recognize(&audio).await {
        Ok(Some(text)) if !text.trim().is_empty() => Ok(text),
        Ok(_) => Err(RecognitionError::NoSpeech),
        Err(e) => {
            error!("Speech recognition failed: {}", e);
            Err(RecognitionError::Downstream(e.to_string()))
        }
    }
}
