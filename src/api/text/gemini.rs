// --- GEMINI GENERATION ---
// Single non-streaming generateContent call.

use super::TextGenerator;
use crate::api::client::{describe_http_error, UREQ_AGENT};
use anyhow::Result;

pub struct GeminiClient {
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        )
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("NO_API_KEY:gemini"));
        }

        let payload = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });

        // Error statuses come back as responses so their JSON message survives.
        let resp = UREQ_AGENT
            .post(&self.endpoint())
            .config()
            .http_status_as_error(false)
            .build()
            .header("x-goog-api-key", self.api_key.as_str())
            .send_json(payload)
            .map_err(|e| describe_http_error("Gemini", e))?;

        let status = resp.status().as_u16();
        let body = resp.into_body().read_json::<serde_json::Value>();
        match body {
            Ok(json) => interpret_response(status, Some(&json)),
            Err(e) if status < 400 => Err(anyhow::anyhow!("Gemini Error: unreadable response: {}", e)),
            Err(_) => interpret_response(status, None),
        }
    }

    fn name(&self) -> String {
        format!("Gemini ({})", self.model)
    }
}

/// Turn a status plus (optional) JSON body into the generated text or an error.
///
/// Auth and quota statuses keep their short codes; other failures carry the
/// API's own `error.message` when the body has one.
pub fn interpret_response(status: u16, body: Option<&serde_json::Value>) -> Result<String> {
    if matches!(status, 401 | 403 | 429) {
        return Err(describe_http_error("Gemini", ureq::Error::StatusCode(status)));
    }
    if status >= 400 {
        let detail = body
            .and_then(api_error_message)
            .map(str::to_string)
            .unwrap_or_else(|| format!("http status: {status}"));
        return Err(anyhow::anyhow!("Gemini Error: {}", detail));
    }
    match body {
        Some(json) => extract_text(json),
        None => Err(anyhow::anyhow!("No content received from API (empty body)")),
    }
}

fn api_error_message(json: &serde_json::Value) -> Option<&str> {
    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
}

/// Concatenate the non-thought text parts of the first candidate.
pub fn extract_text(json: &serde_json::Value) -> Result<String> {
    if let Some(message) = api_error_message(json) {
        return Err(anyhow::anyhow!("Gemini Error: {}", message));
    }

    let parts = json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|first| first.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    let text = parts
        .map(|parts| {
            parts
                .iter()
                .filter(|p| !p.get("thought").and_then(|t| t.as_bool()).unwrap_or(false))
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = json
            .get("promptFeedback")
            .and_then(|f| f.get("blockReason"))
            .and_then(|r| r.as_str())
            .unwrap_or("empty response");
        return Err(anyhow::anyhow!("No content received from API ({})", reason));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Line one\n" }, { "text": "Line two" }] }
            }]
        });
        assert_eq!(extract_text(&body).unwrap(), "Line one\nLine two");
    }

    #[test]
    fn test_extract_skips_thoughts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "Answer" }
                ] }
            }]
        });
        assert_eq!(extract_text(&body).unwrap(), "Answer");
    }

    #[test]
    fn test_extract_reports_block_reason() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = extract_text(&body).unwrap_err().to_string();
        assert!(err.contains("SAFETY"));
    }

    #[test]
    fn test_extract_reports_api_error() {
        let body = json!({ "error": { "code": 400, "message": "API key not valid" } });
        let err = extract_text(&body).unwrap_err().to_string();
        assert!(err.contains("API key not valid"));
    }

    #[test]
    fn test_bad_request_surfaces_api_message() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        });
        let err = interpret_response(400, Some(&body)).unwrap_err().to_string();
        assert_eq!(err, "Gemini Error: API key not valid. Please pass a valid API key.");
    }

    #[test]
    fn test_auth_and_quota_statuses_keep_codes() {
        let body = json!({ "error": { "message": "denied" } });
        let err = interpret_response(403, Some(&body)).unwrap_err().to_string();
        assert_eq!(err, "INVALID_API_KEY");
        let err = interpret_response(429, None).unwrap_err().to_string();
        assert_eq!(err, "QUOTA_EXCEEDED:Gemini");
    }

    #[test]
    fn test_error_status_without_body_names_status() {
        let err = interpret_response(503, None).unwrap_err().to_string();
        assert!(err.contains("503"), "{err}");
    }

    #[test]
    fn test_success_status_extracts_text() {
        let body = json!({ "candidates": [{ "content": { "parts": [{ "text": "Verse" }] } }] });
        assert_eq!(interpret_response(200, Some(&body)).unwrap(), "Verse");
    }

    #[test]
    fn test_empty_key_rejected_before_request() {
        let client = GeminiClient::new("  ", "gemini-2.0-flash");
        let err = client.generate("hello").unwrap_err().to_string();
        assert_eq!(err, "NO_API_KEY:gemini");
    }
}
