//! EduQuest library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod speech;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which text-to-speech backend voices utterances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackend {
    /// Write utterances to the log only
    #[default]
    Silent,
    /// Shell out to an espeak-compatible synthesizer
    System,
}
