// --- APP MODULE ---
// EduSongApp: owns all render-loop state and turns input events into actions.

mod rendering;

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use super::state::{ScrollState, Spinner, TopicInput};
use super::{TARGET_FPS, VIEWPORT_HEIGHT};
use crate::api::SpeechQueue;
use crate::config::Mode;
use crate::dispatch::{Dispatcher, VerseState};

/// Pixels of smooth (touchpad) scrolling that count as one wheel notch
const POINTS_PER_NOTCH: f32 = 40.0;

/// Keyboard and wheel input, already decoded from egui events.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Text(String),
    Backspace,
    Submit,
    ScrollUp,
    ScrollDown,
    /// Wheel notches; positive scrolls towards the top
    Wheel(f32),
}

pub struct EduSongApp {
    dispatcher: Dispatcher,
    speech: Arc<SpeechQueue>,
    pub(crate) mode: Mode,
    pub(crate) topic: TopicInput,
    pub(crate) verse: VerseState,
    pub(crate) scroll: ScrollState,
    pub(crate) spinner: Spinner,
}

impl EduSongApp {
    pub fn new(dispatcher: Dispatcher, speech: Arc<SpeechQueue>, mode: Mode) -> Self {
        Self {
            dispatcher,
            speech,
            mode,
            topic: TopicInput::default(),
            verse: VerseState::default(),
            scroll: ScrollState::new(VIEWPORT_HEIGHT),
            spinner: Spinner::default(),
        }
    }

    /// Switch the prompt template. Returns true when the mode changed.
    pub fn select_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        crate::log_info!("Mode: {} -> {}", self.mode.label(), mode.label());
        self.mode = mode;
        true
    }

    pub fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Wheel(notches) => self.scroll.wheel(notches),
            _ if !self.topic.focused => {}
            InputAction::Text(text) => self.topic.insert(&text),
            InputAction::Backspace => self.topic.backspace(),
            InputAction::Submit => self.submit(),
            InputAction::ScrollUp => self.scroll.step_up(),
            InputAction::ScrollDown => self.scroll.step_down(),
        }
    }

    fn submit(&mut self) {
        if self.verse.loading || self.topic.is_blank() {
            return;
        }
        if let Some(id) = self.dispatcher.submit(&self.topic.text, self.mode) {
            self.verse.begin(id);
            self.topic.take();
            self.scroll.reset();
        }
    }

    /// Apply finished generations; results of superseded requests are dropped.
    pub fn drain_results(&mut self) {
        for event in self.dispatcher.poll() {
            let id = event.id();
            if self.verse.apply(event) {
                self.scroll.reset();
            } else if !self.dispatcher.is_latest(id) {
                crate::log_info!("Dispatch: dropping result of superseded request #{}", id);
            }
        }
    }
}

/// Decode this frame's raw events into app actions.
fn collect_actions(ctx: &egui::Context) -> Vec<InputAction> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Text(text) | egui::Event::Paste(text) => {
                    Some(InputAction::Text(text.clone()))
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Backspace => Some(InputAction::Backspace),
                    egui::Key::Enter => Some(InputAction::Submit),
                    egui::Key::ArrowUp => Some(InputAction::ScrollUp),
                    egui::Key::ArrowDown => Some(InputAction::ScrollDown),
                    _ => None,
                },
                egui::Event::MouseWheel { unit, delta, .. } => {
                    let notches = match unit {
                        egui::MouseWheelUnit::Point => delta.y / POINTS_PER_NOTCH,
                        egui::MouseWheelUnit::Line => delta.y,
                        egui::MouseWheelUnit::Page => delta.y * 3.0,
                    };
                    (notches != 0.0).then_some(InputAction::Wheel(notches))
                }
                _ => None,
            })
            .collect()
    })
}

impl eframe::App for EduSongApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_results();

        for action in collect_actions(ctx) {
            self.handle_action(action);
        }

        if self.verse.loading {
            self.spinner.advance();
        }

        self.render_main_layout(ctx);

        ctx.request_repaint_after(Duration::from_secs_f32(1.0 / TARGET_FPS));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        crate::log_info!(
            "Shutdown: window closed (speaking: {}), dropping {} queued utterance(s)",
            self.speech.is_speaking(),
            self.speech.pending()
        );
        self.speech.shutdown();
    }
}
