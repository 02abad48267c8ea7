// --- TEXT API MODULE ---
// Prompt templates and the remote text-generation call.

mod gemini;
mod templates;

pub use gemini::GeminiClient;
pub use templates::build_prompt;

use anyhow::Result;

/// A blocking text-generation backend. One call per submission.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Display name for logs (e.g. "Gemini (gemini-2.0-flash)").
    fn name(&self) -> String;
}

/// Trim the response and split it into lines on line breaks.
pub fn split_response(text: &str) -> Vec<String> {
    text.trim().lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_response_trims_outer_whitespace() {
        let lines = split_response("\n\n  Title\nLine A\r\nLine B\n\n");
        assert_eq!(lines, vec!["Title", "Line A", "Line B"]);
    }

    #[test]
    fn test_split_response_keeps_inner_blank_lines() {
        let lines = split_response("Verse one\n\nVerse two");
        assert_eq!(lines, vec!["Verse one", "", "Verse two"]);
    }
}
