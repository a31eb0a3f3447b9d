pub mod forwarder;
pub mod google;
pub mod interface;
pub mod languages;

pub use forwarder::{TranslationError, TranslationForwarder, TranslationResult};
pub use google::GoogleTranslator;
pub use interface::{TranslateRequest, TranslatorInterface};
