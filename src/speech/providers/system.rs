//! Speech backend that shells out to an espeak-compatible synthesizer.
//!
//! The child process is spawned with `kill_on_drop`, so aborting the task
//! that awaits [`SystemSpeech::speak`] also silences the synthesizer. That
//! is how a new utterance cuts off the previous one.

use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

use crate::speech::{SpeechError, SpeechProvider, Utterance};

pub const DEFAULT_COMMAND: &str = "espeak-ng";

/// espeak's default speed in words per minute.
const BASE_WPM: f32 = 175.0;
const MIN_WPM: f32 = 80.0;
const MAX_WPM: f32 = 450.0;
/// espeak's default pitch on its 0-99 scale.
const BASE_PITCH: f32 = 50.0;

pub struct SystemSpeech {
    command: String,
}

impl SystemSpeech {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Translate an utterance into espeak command-line arguments.
    pub fn args(utterance: &Utterance) -> Vec<String> {
        let wpm = (BASE_WPM * utterance.rate).clamp(MIN_WPM, MAX_WPM).round() as u32;
        let pitch = (BASE_PITCH * utterance.pitch).clamp(0.0, 99.0).round() as u32;
        vec![
            "-v".to_string(),
            utterance.language.to_lowercase(),
            "-s".to_string(),
            wpm.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            // Terminate option parsing so text starting with '-' is spoken
            "--".to_string(),
            utterance.text.clone(),
        ]
    }
}

#[async_trait]
impl SpeechProvider for SystemSpeech {
    fn name(&self) -> &str {
        &self.command
    }

    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let args = Self::args(utterance);
        debug!("Running {} {:?}", self.command, args);

        let status = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(SpeechError::Spawn)?;

        if status.success() {
            Ok(())
        } else {
            warn!("{} exited with {}", self.command, status);
            Err(SpeechError::Exit {
                command: self.command.clone(),
                status: status.code(),
            })
        }
    }
}
