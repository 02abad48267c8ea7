//! Audio file playback via rodio.
//!
//! Each utterance gets a fresh `Sink` on the shared output stream; the
//! previous sink is stopped and dropped first so only one plays at a time.

use super::Playback;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

pub struct RodioPlayer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl RodioPlayer {
    /// Open the default audio output device.
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| anyhow::anyhow!("Failed to open audio output: {}", e))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
        })
    }
}

impl Playback for RodioPlayer {
    fn play(&mut self, path: &Path) -> Result<()> {
        self.stop();

        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode {}", path.display()))?;
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| anyhow::anyhow!("Failed to create audio sink: {}", e))?;
        sink.append(source);

        // Blocks on rodio's end-of-queue signal, no polling.
        sink.sleep_until_end();
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
