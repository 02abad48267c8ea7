//! Uniquely named temporary audio files, removed when dropped.

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name prefix shared by every artifact, used for startup cleanup.
pub const ARTIFACT_PREFIX: &str = "edu-song-tts-";

#[derive(Debug)]
pub struct TempAudioFile {
    path: PathBuf,
}

impl TempAudioFile {
    /// Fresh path in the system temp dir; nothing is written yet.
    pub fn reserve(extension: &str) -> Self {
        Self::reserve_in(&std::env::temp_dir(), extension)
    }

    pub fn reserve_in(dir: &Path, extension: &str) -> Self {
        let name = format!("{}{}.{}", ARTIFACT_PREFIX, uuid::Uuid::new_v4(), extension);
        Self {
            path: dir.join(name),
        }
    }

    /// Write `bytes` to a fresh artifact. The guard is only returned once the
    /// write succeeded; a partial file is removed by the dropped guard.
    pub fn write(bytes: &[u8], extension: &str) -> Result<Self> {
        let file = Self::reserve(extension);
        std::fs::write(&file.path, bytes)
            .with_context(|| format!("Failed to write {}", file.path.display()))?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The audio decoder can still hold the file open for a moment after
/// playback ends, which blocks deletion on Windows.
const REMOVE_ATTEMPTS: usize = 5;
const REMOVE_RETRY_DELAY: Duration = Duration::from_millis(50);

impl Drop for TempAudioFile {
    fn drop(&mut self) {
        if let Err(e) = remove_with_retry(&self.path, REMOVE_RETRY_DELAY, |p| std::fs::remove_file(p)) {
            crate::log_error!("TTS: failed to remove {}: {}", self.path.display(), e);
        }
    }
}

/// Remove `path`, retrying while the file is still locked. A file that is
/// already gone counts as removed.
fn remove_with_retry<F>(path: &Path, delay: Duration, mut remove: F) -> io::Result<()>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut attempt = 1;
    loop {
        match remove(path) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied && attempt < REMOVE_ATTEMPTS => {
                attempt += 1;
                std::thread::sleep(delay);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Remove artifacts left behind by a previous session that crashed mid-playback.
pub fn cleanup_stale_artifacts(dir: &Path) -> usize {
    let mut removed = 0;
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(ARTIFACT_PREFIX)
                && std::fs::remove_file(entry.path()).is_ok()
            {
                removed += 1;
            }
        }
    }
    removed
}
