use std::sync::Arc;

use crate::asr::{ASRInterface, GoogleSpeechRecognizer};
use crate::config::Config;
use crate::extract::Extractor;
use crate::ocr::TesseractOcr;
use crate::translate::{GoogleTranslator, TranslationForwarder};
use crate::upload::UploadStore;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: Arc<Extractor>,
    pub forwarder: Arc<TranslationForwarder>,
    pub recognizer: Arc<dyn ASRInterface>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let ocr = Arc::new(TesseractOcr::from_config(&config.ocr));
        let translator = Arc::new(GoogleTranslator::from_config(&config.translation));
        let recognizer = Arc::new(GoogleSpeechRecognizer::from_config(&config.speech));

        let extractor = Extractor::new(ocr);
        let forwarder =
            TranslationForwarder::new(translator, config.translation.default_target_lang.clone());
        let uploads = UploadStore::new(&config.server.upload_dir);

        Self::from_parts(config, extractor, forwarder, recognizer, uploads)
    }

    pub fn from_parts(
        config: Config,
        extractor: Extractor,
        forwarder: TranslationForwarder,
        recognizer: Arc<dyn ASRInterface>,
        uploads: UploadStore,
    ) -> Self {
        Self {
            config: Arc::new(config),
            extractor: Arc::new(extractor),
            forwarder: Arc::new(forwarder),
            recognizer,
            uploads: Arc::new(uploads),
        }
    }
}
