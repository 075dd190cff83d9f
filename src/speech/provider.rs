use std::fmt;

use async_trait::async_trait;

/// Errors raised while voicing an utterance.
#[derive(Debug)]
pub enum SpeechError {
    /// The synthesizer process could not be started (missing binary, permissions).
    Spawn(std::io::Error),
    /// The synthesizer ran but exited unsuccessfully.
    Exit { command: String, status: Option<i32> },
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Spawn(e) => write!(f, "failed to start speech synthesizer: {e}"),
            SpeechError::Exit { command, status } => match status {
                Some(code) => write!(f, "{command} exited with status {code}"),
                None => write!(f, "{command} was terminated by a signal"),
            },
        }
    }
}

impl std::error::Error for SpeechError {}

/// One request to read text aloud.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Speaking rate multiplier, 1.0 = the synthesizer's normal speed.
    pub rate: f32,
    /// Pitch multiplier, 1.0 = the synthesizer's default voice pitch.
    pub pitch: f32,
    /// BCP-47 language tag, e.g. `en-US`.
    pub language: String,
}

/// The configured voice every utterance starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
}

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_RATE: f32 = 1.0;
pub const DEFAULT_PITCH: f32 = 1.1;

impl Default for Voice {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            rate: DEFAULT_RATE,
            pitch: DEFAULT_PITCH,
        }
    }
}

impl Voice {
    /// Build an utterance at this voice, scaling the base rate by `pace`.
    pub fn utterance(&self, text: impl Into<String>, pace: f32) -> Utterance {
        Utterance {
            text: text.into(),
            rate: self.rate * pace,
            pitch: self.pitch,
            language: self.language.clone(),
        }
    }
}

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Speak the utterance, resolving once playback has finished.
    ///
    /// Callers cancel playback by aborting the task driving this future.
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_scales_rate_by_pace() {
        let voice = Voice::default();
        let slow = voice.utterance("Hello", 0.7);
        assert!((slow.rate - 0.7).abs() < f32::EPSILON);
        assert!((slow.pitch - 1.1).abs() < f32::EPSILON);
        assert_eq!(slow.language, "en-US");
        assert_eq!(slow.text, "Hello");
    }

    #[test]
    fn test_error_display() {
        let err = SpeechError::Exit {
            command: "espeak-ng".to_string(),
            status: Some(2),
        };
        assert_eq!(err.to_string(), "espeak-ng exited with status 2");
    }
}
