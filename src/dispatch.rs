//! Request dispatcher: one generation worker per submission, results
//! delivered back to the render loop over a channel.
//!
//! Overlapping submissions follow cancel-and-replace: only the most recent
//! request may update the output panel or queue speech. Superseded calls
//! still run to completion (the HTTP call cannot be aborted) but their
//! result is dropped.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use eframe::egui;

use crate::api::tts::worker::panic_message;
use crate::api::{build_prompt, split_response, SpeechQueue, TextGenerator};
use crate::config::Mode;

pub type RequestId = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchEvent {
    Completed { id: RequestId, lines: Vec<String> },
    Failed { id: RequestId, message: String },
}

impl DispatchEvent {
    pub fn id(&self) -> RequestId {
        match self {
            DispatchEvent::Completed { id, .. } | DispatchEvent::Failed { id, .. } => *id,
        }
    }
}

pub struct Dispatcher {
    generator: Arc<dyn TextGenerator>,
    speech: Arc<SpeechQueue>,
    /// Id of the most recent submission (0 = none yet)
    latest: Arc<AtomicU64>,
    tx: Sender<DispatchEvent>,
    rx: Receiver<DispatchEvent>,
    repaint: Option<egui::Context>,
}

impl Dispatcher {
    pub fn new(generator: Arc<dyn TextGenerator>, speech: Arc<SpeechQueue>) -> Self {
        let (tx, rx) = channel();
        Self {
            generator,
            speech,
            latest: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
            repaint: None,
        }
    }

    /// Wake the render loop whenever a worker finishes.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    /// Start a generation for `topic`. Blank topics are ignored and make no call.
    pub fn submit(&self, topic: &str, mode: Mode) -> Option<RequestId> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }

        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let job = GenerationJob {
            id,
            prompt: build_prompt(topic, mode),
            generator: self.generator.clone(),
            speech: self.speech.clone(),
            latest: self.latest.clone(),
            tx: self.tx.clone(),
            repaint: self.repaint.clone(),
        };

        crate::log_info!(
            "Dispatch: request #{} ({}) topic {:?} via {}",
            id,
            mode.label(),
            topic,
            self.generator.name()
        );

        let spawned = std::thread::Builder::new()
            .name(format!("generation-{id}"))
            .spawn(move || job.run());
        if let Err(e) = spawned {
            crate::log_error!("Dispatch: failed to spawn worker for #{}: {}", id, e);
            let _ = self.tx.send(DispatchEvent::Failed {
                id,
                message: format!("Could not start request: {e}"),
            });
        }
        Some(id)
    }

    /// Drain finished requests without blocking.
    pub fn poll(&self) -> Vec<DispatchEvent> {
        self.rx.try_iter().collect()
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest.load(Ordering::SeqCst) == id
    }
}

struct GenerationJob {
    id: RequestId,
    prompt: String,
    generator: Arc<dyn TextGenerator>,
    speech: Arc<SpeechQueue>,
    latest: Arc<AtomicU64>,
    tx: Sender<DispatchEvent>,
    repaint: Option<egui::Context>,
}

impl GenerationJob {
    fn run(self) {
        let id = self.id;
        let outcome = catch_unwind(AssertUnwindSafe(|| self.generator.generate(&self.prompt)));

        let event = match outcome {
            Ok(Ok(text)) => {
                let lines = split_response(&text);
                if lines.is_empty() {
                    DispatchEvent::Failed {
                        id,
                        message: "No content received from API".to_string(),
                    }
                } else {
                    if self.latest.load(Ordering::SeqCst) == id {
                        self.speech.enqueue(lines.join("\n"));
                    } else {
                        crate::log_info!("Dispatch: request #{} superseded, not speaking", id);
                    }
                    DispatchEvent::Completed { id, lines }
                }
            }
            Ok(Err(e)) => DispatchEvent::Failed {
                id,
                message: format!("{:#}", e),
            },
            Err(panic) => DispatchEvent::Failed {
                id,
                message: format!("Generation crashed: {}", panic_message(&*panic)),
            },
        };

        match &event {
            DispatchEvent::Completed { lines, .. } => {
                crate::log_info!("Dispatch: request #{} returned {} line(s)", id, lines.len())
            }
            DispatchEvent::Failed { message, .. } => {
                crate::log_error!("Dispatch: request #{} failed: {}", id, message)
            }
        }

        // The receiver is gone only when the window closed.
        let _ = self.tx.send(event);
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

/// Output panel state owned by the render loop.
#[derive(Debug, Default)]
pub struct VerseState {
    pub lines: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    awaiting: Option<RequestId>,
}

impl VerseState {
    /// A new request replaces whatever was shown or pending.
    pub fn begin(&mut self, id: RequestId) {
        self.awaiting = Some(id);
        self.loading = true;
        self.lines.clear();
        self.error = None;
    }

    /// Apply a worker result. Returns false for results of superseded requests.
    pub fn apply(&mut self, event: DispatchEvent) -> bool {
        if self.awaiting != Some(event.id()) {
            return false;
        }
        self.awaiting = None;
        self.loading = false;
        match event {
            DispatchEvent::Completed { lines, .. } => {
                self.lines = lines;
                self.error = None;
            }
            DispatchEvent::Failed { message, .. } => {
                self.lines.clear();
                self.error = Some(format!("⚠ Could not generate text: {message}"));
            }
        }
        true
    }
}
