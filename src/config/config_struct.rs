//! Config struct definition.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::types::{default_model, default_tts_language, Mode, TtsBackend, API_KEY_ENV};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub tts_backend: TtsBackend,
    /// ISO 639-1 code for cloud TTS, or "auto"
    #[serde(default = "default_tts_language")]
    pub tts_language: String,
    #[serde(default)]
    pub default_mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            model: default_model(),
            tts_backend: TtsBackend::default(),
            tts_language: default_tts_language(),
            default_mode: Mode::default(),
        }
    }
}

impl Config {
    /// Fail fast when no Gemini key is available from env, `.env` or the config file.
    pub fn require_api_key(&self) -> Result<&str> {
        let key = self.gemini_api_key.trim();
        if key.is_empty() {
            anyhow::bail!(
                "NO_API_KEY: set {} in the environment, in a .env file, or as \"gemini_api_key\" in {}",
                API_KEY_ENV,
                super::io::get_config_path().display()
            );
        }
        Ok(key)
    }
}
