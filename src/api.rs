// --- API MODULE ---
// Remote text generation and speech synthesis.

pub mod client;
pub mod text;
pub mod tts;

pub use text::{build_prompt, split_response, GeminiClient, TextGenerator};
pub use tts::SpeechQueue;
