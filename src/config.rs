use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;
use tracing::debug;

/// Paths tried by [`Config::discover`] after `CONFIG_PATH`.
const DEFAULT_CONFIG_PATHS: &[&str] = &["conf.yaml", "conf.yml", "conf.json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub translation: TranslationConfig,
    pub ocr: OcrConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: String,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            upload_dir: "uploads".to_string(),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub base_url: String,
    pub default_target_lang: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            default_target_lang: "hi".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub binary: String,
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "http://www.google.com/speech-api/v2/recognize".to_string(),
            api_key: None,
            language: "en-US".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file.
    ///
    /// `${VAR}` references are replaced with the value of the environment
    /// variable; unset variables are left as written.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        // BOM is stripped by the decoder
        let (content, _, _) = encoding_rs::UTF_8.decode(&bytes);
        let content = substitute_env_vars(&content)?;

        let path_lower = path.to_string_lossy().to_lowercase();
        if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            Ok(serde_json::from_str(&content)?)
        } else if content.trim().is_empty() {
            Ok(Self::default())
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Find and load the first configuration file that exists.
    ///
    /// Returns the defaults together with `None` when no file is found.
    pub fn discover() -> Result<(Self, Option<String>)> {
        let candidates: Vec<String> = std::env::var("CONFIG_PATH")
            .ok()
            .into_iter()
            .chain(DEFAULT_CONFIG_PATHS.iter().map(|p| p.to_string()))
            .collect();

        for path in candidates {
            if !Path::new(&path).exists() {
                debug!("No config file at {}", path);
                continue;
            }
            let config = Self::load(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path, e))?;
            return Ok((config, Some(path)));
        }

        Ok((Self::default(), None))
    }
}

fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_cover_every_section() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.upload_dir, "uploads");
        assert_eq!(config.translation.default_target_lang, "hi");
        assert_eq!(config.ocr.binary, "tesseract");
    }

    #[test]
    fn loads_partial_yaml_with_env_substitution() -> Result<()> {
        std::env::set_var("BHASHA_TEST_UPLOAD_DIR", "/tmp/bhasha-uploads");
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        writeln!(
            file,
            "server:\n  port: 8080\n  upload_dir: ${{BHASHA_TEST_UPLOAD_DIR}}\nspeech:\n  api_key: ${{BHASHA_TEST_UNSET_KEY}}"
        )?;

        let config = Config::load(file.path())?;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.upload_dir, "/tmp/bhasha-uploads");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.speech.api_key.as_deref(),
            Some("${BHASHA_TEST_UNSET_KEY}")
        );
        assert_eq!(config.translation.base_url, "https://translate.googleapis.com");
        Ok(())
    }

    #[test]
    fn loads_json_with_bom() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        file.write_all(&[0xEF, 0xBB, 0xBF])?;
        file.write_all(br#"{"translation": {"default_target_lang": "ta"}}"#)?;

        let config = Config::load(file.path())?;
        assert_eq!(config.translation.default_target_lang, "ta");
        assert_eq!(config.server.port, 5000);
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        file.write_all(b"{ not json")?;
        assert!(Config::load(file.path()).is_err());
        Ok(())
    }
}
