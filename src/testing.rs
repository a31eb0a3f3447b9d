//! In-memory collaborators for tests.
//!
//! Each fake returns a scripted reply and records what it was asked, so
//! tests can assert on the number and content of outbound calls.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::GrayImage;

use crate::asr::{ASRInterface, PcmAudio};
use crate::config::Config;
use crate::extract::Extractor;
use crate::ocr::OcrInterface;
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslationForwarder, TranslatorInterface};
use crate::upload::UploadStore;

pub struct RecordingTranslator {
    reply: Result<String, String>,
    requests: Mutex<Vec<TranslateRequest>>,
}

impl RecordingTranslator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslatorInterface for RecordingTranslator {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, anyhow::Error> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(|message| anyhow::anyhow!(message))
    }
}

pub struct ScriptedOcr {
    reply: Result<String, String>,
    images: Mutex<Vec<GrayImage>>,
}

impl ScriptedOcr {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            images: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            images: Mutex::new(Vec::new()),
        }
    }

    pub fn images(&self) -> Vec<GrayImage> {
        self.images.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.images.lock().unwrap().len()
    }
}

#[async_trait]
impl OcrInterface for ScriptedOcr {
    async fn recognize(&self, image: &GrayImage) -> Result<String, anyhow::Error> {
        self.images.lock().unwrap().push(image.clone());
        self.reply.clone().map_err(|message| anyhow::anyhow!(message))
    }
}

pub struct ScriptedRecognizer {
    reply: Result<Option<String>, String>,
    sample_counts: Mutex<Vec<usize>>,
}

impl ScriptedRecognizer {
    pub fn hearing(text: Option<&str>) -> Self {
        Self {
            reply: Ok(text.map(str::to_string)),
            sample_counts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            sample_counts: Mutex::new(Vec::new()),
        }
    }

    pub fn sample_counts(&self) -> Vec<usize> {
        self.sample_counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ASRInterface for ScriptedRecognizer {
    async fn recognize(&self, audio: &PcmAudio) -> Result<Option<String>, anyhow::Error> {
        self.sample_counts.lock().unwrap().push(audio.samples.len());
        self.reply.clone().map_err(|message| anyhow::anyhow!(message))
    }
}

/// Application state wired to the given fakes, storing uploads in `upload_dir`.
pub fn test_state(
    translator: Arc<RecordingTranslator>,
    ocr: Arc<ScriptedOcr>,
    recognizer: Arc<ScriptedRecognizer>,
    upload_dir: &Path,
) -> AppState {
    let mut config = Config::default();
    config.server.upload_dir = upload_dir.to_string_lossy().into_owned();

    let forwarder =
        TranslationForwarder::new(translator, config.translation.default_target_lang.clone());
    AppState::from_parts(
        config,
        Extractor::new(ocr),
        forwarder,
        recognizer,
        UploadStore::new(upload_dir),
    )
}
