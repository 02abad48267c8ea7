//! Google Translate TTS: downloads MP3 chunks into one temporary file.

use super::artifact::TempAudioFile;
use super::{SpeechSynth, Utterance};
use crate::api::client::TTS_AGENT;
use anyhow::Result;
use std::time::Duration;

/// The endpoint rejects longer `q` values
pub const MAX_CHUNK_CHARS: usize = 200;

const RETRY_DELAYS_MS: [u64; 3] = [200, 500, 1000];

pub struct GoogleTranslateTts {
    /// ISO 639-1 code or "auto"
    language: String,
}

impl GoogleTranslateTts {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    fn language_for(&self, text: &str) -> String {
        if self.language.eq_ignore_ascii_case("auto") || self.language.trim().is_empty() {
            detect_language(text).to_string()
        } else {
            self.language.clone()
        }
    }

    fn fetch_chunk(&self, chunk: &str, tl: &str, idx: usize, total: usize) -> Result<Vec<u8>> {
        let url = format!(
            "https://translate.google.com/translate_tts?ie=UTF-8&q={}&tl={}&client=tw-ob&total={}&idx={}&textlen={}",
            urlencoding::encode(chunk),
            tl,
            total,
            idx,
            chunk.chars().count()
        );

        let mut last_err = None;
        for (attempt, delay_ms) in RETRY_DELAYS_MS.iter().enumerate() {
            match TTS_AGENT
                .get(&url)
                .header(
                    "User-Agent",
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
                )
                .call()
            {
                Ok(response) => match response.into_body().read_to_vec() {
                    Ok(data) if !data.is_empty() => return Ok(data),
                    Ok(_) => last_err = Some(anyhow::anyhow!("empty audio response")),
                    Err(e) => last_err = Some(anyhow::anyhow!(e)),
                },
                Err(e) => last_err = Some(anyhow::anyhow!(e)),
            }

            if attempt < RETRY_DELAYS_MS.len() - 1 {
                std::thread::sleep(Duration::from_millis(*delay_ms));
            }
        }

        Err(anyhow::anyhow!(
            "Google TTS failed for chunk {}/{}: {}",
            idx + 1,
            total,
            last_err.map(|e| e.to_string()).unwrap_or_default()
        ))
    }
}

impl SpeechSynth for GoogleTranslateTts {
    fn synthesize(&mut self, text: &str) -> Result<Utterance> {
        let chunks = split_for_tts(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Ok(Utterance::Silent);
        }

        let tl = self.language_for(text);
        let total = chunks.len();
        let mut mp3 = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            // MP3 frames are self-delimiting, so chunks can simply be concatenated.
            mp3.extend(self.fetch_chunk(chunk, &tl, idx, total)?);
        }

        Ok(Utterance::Audio(TempAudioFile::write(&mp3, "mp3")?))
    }

    fn name(&self) -> String {
        format!("Google Translate TTS ({})", self.language)
    }
}

/// Best-effort ISO 639-1 code for the utterance
pub fn detect_language(text: &str) -> &'static str {
    match whatlang::detect_lang(text).unwrap_or(whatlang::Lang::Eng) {
        whatlang::Lang::Vie => "vi",
        whatlang::Lang::Kor => "ko",
        whatlang::Lang::Jpn => "ja",
        whatlang::Lang::Cmn => "zh",
        whatlang::Lang::Fra => "fr",
        whatlang::Lang::Deu => "de",
        whatlang::Lang::Spa => "es",
        whatlang::Lang::Rus => "ru",
        whatlang::Lang::Ita => "it",
        whatlang::Lang::Por => "pt",
        _ => "en",
    }
}

/// Split on whitespace into chunks of at most `max_chars` characters.
/// Words longer than the limit are cut at character boundaries.
pub fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
