//! Local speech through whatever system synthesizer is installed.
//!
//! The utterance is piped over stdin so text starting with `-` is never
//! parsed as a flag. Speaking is synchronous: `synthesize` returns once the
//! synthesizer process exits.

use super::{SpeechSynth, Utterance};
use anyhow::{Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// A synthesizer command line that reads the utterance from stdin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoiceCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

#[cfg(target_os = "windows")]
const CANDIDATES: &[VoiceCommand] = &[VoiceCommand {
    program: "powershell",
    args: &[
        "-NoProfile",
        "-Command",
        "Add-Type -AssemblyName System.Speech; (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak([Console]::In.ReadToEnd())",
    ],
}];

#[cfg(target_os = "macos")]
const CANDIDATES: &[VoiceCommand] = &[VoiceCommand {
    program: "say",
    args: &["-f", "-"],
}];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const CANDIDATES: &[VoiceCommand] = &[
    VoiceCommand {
        program: "espeak-ng",
        args: &["--stdin"],
    },
    VoiceCommand {
        program: "espeak",
        args: &["--stdin"],
    },
    VoiceCommand {
        program: "spd-say",
        args: &["--wait", "--pipe-mode"],
    },
];

pub struct LocalSpeech {
    candidates: Vec<VoiceCommand>,
    /// Index of the first candidate that actually launched
    resolved: Option<usize>,
}

impl Default for LocalSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSpeech {
    pub fn new() -> Self {
        Self::with_candidates(CANDIDATES.to_vec())
    }

    pub fn with_candidates(candidates: Vec<VoiceCommand>) -> Self {
        Self {
            candidates,
            resolved: None,
        }
    }

    fn run(command: &VoiceCommand, text: &str) -> std::io::Result<std::process::ExitStatus> {
        let mut child = Command::new(command.program)
            .args(command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // Dropping stdin closes the pipe so the synthesizer sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written.map(|()| status)
    }
}

impl SpeechSynth for LocalSpeech {
    fn synthesize(&mut self, text: &str) -> Result<Utterance> {
        let start = self.resolved.unwrap_or(0);
        for (idx, command) in self.candidates.iter().enumerate().skip(start) {
            match Self::run(command, text) {
                Ok(status) => {
                    self.resolved = Some(idx);
                    if !status.success() {
                        anyhow::bail!("{} exited with {}", command.program, status);
                    }
                    return Ok(Utterance::Spoken);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to run {}", command.program));
                }
            }
        }

        let tried: Vec<&str> = self.candidates.iter().map(|c| c.program).collect();
        Err(anyhow::anyhow!(
            "No system TTS command found (tried {})",
            tried.join(", ")
        ))
    }

    fn name(&self) -> String {
        match self.resolved.and_then(|idx| self.candidates.get(idx)) {
            Some(command) => format!("Local ({})", command.program),
            None => "Local".to_string(),
        }
    }
}
