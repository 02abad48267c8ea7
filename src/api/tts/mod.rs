//! Text-to-Speech playback queue.
//!
//! Utterances are spoken strictly in submission order by one long-lived
//! worker thread. Two backends are available:
//! - `local`: the system synthesizer, spoken synchronously
//! - `google`: Google Translate TTS downloaded to a temporary MP3 and
//!   played through rodio, then deleted

pub mod artifact;
pub mod google;
pub mod local;
pub mod manager;
pub mod player;
pub mod worker;

pub use manager::{SpeechJob, SpeechQueue};

use crate::config::{Config, TtsBackend};
use anyhow::{Context, Result};
use artifact::TempAudioFile;
use std::path::Path;
use std::sync::Arc;

/// What a backend produced for one utterance.
#[derive(Debug)]
pub enum Utterance {
    /// Already spoken by the backend itself
    Spoken,
    /// Nothing to say (blank text)
    Silent,
    /// Audio file to play; deleted when the guard is dropped
    Audio(TempAudioFile),
}

/// A speech backend. Owned by the worker thread.
pub trait SpeechSynth: Send {
    fn synthesize(&mut self, text: &str) -> Result<Utterance>;

    /// Display name for logs (e.g. "Local (espeak-ng)").
    fn name(&self) -> String;
}

/// Plays one audio file to completion. Created on the worker thread since
/// audio output handles are not always `Send`.
pub trait Playback {
    /// Stop anything playing, then play `path`, blocking until it ends.
    fn play(&mut self, path: &Path) -> Result<()>;

    fn stop(&mut self);
}

pub type PlayerFactory = Box<dyn Fn() -> Result<Box<dyn Playback>> + Send>;

pub fn create_synth(config: &Config) -> Box<dyn SpeechSynth> {
    match config.tts_backend {
        TtsBackend::Local => Box::new(local::LocalSpeech::new()),
        TtsBackend::Cloud => Box::new(google::GoogleTranslateTts::new(config.tts_language.clone())),
    }
}

/// Spawn the speech worker - call this once at app startup
pub fn init_tts(queue: Arc<SpeechQueue>, config: &Config) -> Result<std::thread::JoinHandle<()>> {
    let synth = create_synth(config);
    let open_player: PlayerFactory = Box::new(|| -> Result<Box<dyn Playback>> {
        Ok(Box::new(player::RodioPlayer::new()?))
    });

    std::thread::Builder::new()
        .name("speech-worker".to_string())
        .spawn(move || worker::run_speech_worker(queue, synth, open_player))
        .context("Failed to spawn speech worker")
}
