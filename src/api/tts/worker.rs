use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use super::manager::{SpeechJob, SpeechQueue};
use super::{PlayerFactory, Playback, SpeechSynth, Utterance};
use anyhow::Result;

/// Speech worker thread - speaks one job at a time until shutdown
pub fn run_speech_worker(
    queue: Arc<SpeechQueue>,
    mut synth: Box<dyn SpeechSynth>,
    open_player: PlayerFactory,
) {
    crate::log_info!("TTS: worker started ({})", synth.name());
    // Opened on first audio utterance; the local backend never needs it.
    let mut player: Option<Box<dyn Playback>> = None;

    while let Some(job) = queue.next_job() {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            speak_job(&job, synth.as_mut(), &mut player, &open_player)
        }));

        match outcome {
            Ok(Ok(())) => crate::log_info!("TTS: finished job #{}", job.id),
            Ok(Err(e)) => crate::log_error!("TTS: job #{} failed: {:#}", job.id, e),
            Err(panic) => {
                crate::log_error!("TTS: job #{} panicked: {}", job.id, panic_message(&*panic));
                // The player may be mid-call; reopen it for the next job.
                player = None;
            }
        }
        queue.finish_job(job.id);
    }

    if let Some(p) = player.as_mut() {
        p.stop();
    }
    crate::log_info!("TTS: worker stopped");
}

fn speak_job(
    job: &SpeechJob,
    synth: &mut dyn SpeechSynth,
    player: &mut Option<Box<dyn Playback>>,
    open_player: &PlayerFactory,
) -> Result<()> {
    crate::log_info!(
        "TTS: job #{} ({} chars) via {}",
        job.id,
        job.text.chars().count(),
        synth.name()
    );

    match synth.synthesize(&job.text)? {
        Utterance::Spoken | Utterance::Silent => Ok(()),
        // `artifact` is dropped (and deleted) when this arm ends, on success or error.
        Utterance::Audio(artifact) => {
            if player.is_none() {
                *player = Some(open_player()?);
            }
            match player.as_mut() {
                Some(p) => {
                    p.stop();
                    p.play(artifact.path())
                }
                None => Err(anyhow::anyhow!("No audio player available")),
            }
        }
    }
}

pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tts::artifact::TempAudioFile;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        played: Mutex<Vec<String>>,
        artifacts: Mutex<Vec<PathBuf>>,
        active: AtomicUsize,
        max_active: AtomicUsize,
        players_opened: AtomicUsize,
    }

    /// Writes each utterance into a real temp file; "boom" fails, "panic" panics.
    struct FileSynth {
        recorder: Arc<Recorder>,
    }

    impl SpeechSynth for FileSynth {
        fn synthesize(&mut self, text: &str) -> Result<Utterance> {
            match text {
                "boom" => anyhow::bail!("synthesis failed"),
                "panic" => panic!("synth exploded"),
                _ => {}
            }
            let file = TempAudioFile::write(text.as_bytes(), "mp3")?;
            self.recorder
                .artifacts
                .lock()
                .unwrap()
                .push(file.path().to_path_buf());
            Ok(Utterance::Audio(file))
        }

        fn name(&self) -> String {
            "file-synth".to_string()
        }
    }

    /// Reads the artifact back; contents "bad-audio" fail playback.
    struct FakePlayer {
        recorder: Arc<Recorder>,
    }

    impl Playback for FakePlayer {
        fn play(&mut self, path: &Path) -> Result<()> {
            let now = self.recorder.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.recorder.max_active.fetch_max(now, Ordering::SeqCst);
            let text = std::fs::read_to_string(path)?;
            std::thread::sleep(Duration::from_millis(10));
            self.recorder.active.fetch_sub(1, Ordering::SeqCst);
            if text == "bad-audio" {
                anyhow::bail!("decode error");
            }
            self.recorder.played.lock().unwrap().push(text);
            Ok(())
        }

        fn stop(&mut self) {}
    }

    fn start(recorder: &Arc<Recorder>) -> (Arc<SpeechQueue>, std::thread::JoinHandle<()>) {
        let queue = Arc::new(SpeechQueue::new());
        let synth = Box::new(FileSynth {
            recorder: recorder.clone(),
        });
        let player_recorder = recorder.clone();
        let factory: PlayerFactory = Box::new(move || -> Result<Box<dyn Playback>> {
            player_recorder.players_opened.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakePlayer {
                recorder: player_recorder.clone(),
            }))
        });
        let worker_queue = queue.clone();
        let handle = std::thread::spawn(move || run_speech_worker(worker_queue, synth, factory));
        (queue, handle)
    }

    #[test]
    fn test_jobs_play_in_fifo_order_one_at_a_time() {
        let recorder = Arc::new(Recorder::default());
        let (queue, handle) = start(&recorder);

        let texts: Vec<String> = (0..8).map(|i| format!("utterance {i}")).collect();
        for text in &texts {
            queue.enqueue(text.clone());
        }
        assert!(queue.wait_idle(Duration::from_secs(10)));

        assert_eq!(*recorder.played.lock().unwrap(), texts);
        assert_eq!(recorder.max_active.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.players_opened.load(Ordering::SeqCst), 1);

        queue.shutdown();
        handle.join().unwrap();
    }

    #[test]
    fn test_artifacts_removed_after_success_and_failure() {
        let recorder = Arc::new(Recorder::default());
        let (queue, handle) = start(&recorder);

        queue.enqueue("good");
        queue.enqueue("bad-audio");
        assert!(queue.wait_idle(Duration::from_secs(10)));

        let artifacts = recorder.artifacts.lock().unwrap().clone();
        assert_eq!(artifacts.len(), 2);
        for path in artifacts {
            assert!(!path.exists(), "{} still on disk", path.display());
        }

        queue.shutdown();
        handle.join().unwrap();
    }

    #[test]
    fn test_failures_do_not_stop_the_queue() {
        let recorder = Arc::new(Recorder::default());
        let (queue, handle) = start(&recorder);

        queue.enqueue("before");
        queue.enqueue("boom");
        queue.enqueue("panic");
        queue.enqueue("bad-audio");
        queue.enqueue("after");
        assert!(queue.wait_idle(Duration::from_secs(10)));

        assert_eq!(*recorder.played.lock().unwrap(), vec!["before", "after"]);
        assert!(!queue.is_speaking());

        queue.shutdown();
        handle.join().unwrap();
    }

    #[test]
    fn test_player_open_failure_is_per_job() {
        let queue = Arc::new(SpeechQueue::new());
        let recorder = Arc::new(Recorder::default());
        let synth = Box::new(FileSynth {
            recorder: recorder.clone(),
        });
        let factory: PlayerFactory = Box::new(|| -> Result<Box<dyn Playback>> {
            anyhow::bail!("no audio device")
        });
        let worker_queue = queue.clone();
        let handle = std::thread::spawn(move || run_speech_worker(worker_queue, synth, factory));

        queue.enqueue("one");
        queue.enqueue("two");
        assert!(queue.wait_idle(Duration::from_secs(10)));
        for path in recorder.artifacts.lock().unwrap().iter() {
            assert!(!path.exists());
        }

        queue.shutdown();
        handle.join().unwrap();
    }

    #[test]
    fn test_panic_message_extracts_text() {
        let panic = catch_unwind(|| -> u8 { panic!("owned {}", 1) }).unwrap_err();
        assert_eq!(panic_message(&*panic), "owned 1");
        let panic = catch_unwind(|| -> u8 { panic!("static") }).unwrap_err();
        assert_eq!(panic_message(&*panic), "static");
    }
}
