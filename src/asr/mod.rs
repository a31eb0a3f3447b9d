pub mod google;
pub mod interface;
pub mod wav;

pub use google::GoogleSpeechRecognizer;
pub use interface::{transcribe, ASRInterface, RecognitionError};
pub use wav::PcmAudio;
