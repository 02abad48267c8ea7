//! Core enums and defaults for configuration.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// ============================================================================
// GENERATION MODE
// ============================================================================

/// Prompt template / tone selected before submission.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    EduPoem,
    GenZTypeShii,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::EduPoem, Mode::GenZTypeShii];

    pub fn label(self) -> &'static str {
        match self {
            Mode::EduPoem => "EduPoem",
            Mode::GenZTypeShii => "GenZ Type Shii",
        }
    }
}

// ============================================================================
// TTS BACKEND
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TtsBackend {
    /// System speech command, spoken synchronously
    Local,
    /// Google Translate TTS, downloaded to a temp MP3 and played via rodio
    #[default]
    Cloud,
}

pub fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// "auto" detects the language of each utterance
pub fn default_tts_language() -> String {
    "auto".to_string()
}
