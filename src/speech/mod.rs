//! # Speech
//!
//! Text-to-speech behind an async trait, mirroring how the core stays
//! ignorant of any particular synthesizer. The reducer only emits
//! [`Utterance`] values; the TUI hands them to whichever
//! [`SpeechProvider`] the config selected.

pub mod provider;
pub mod providers;

use std::sync::Arc;

use crate::SpeechBackend;

pub use provider::{SpeechError, SpeechProvider, Utterance, Voice};
pub use providers::{SilentSpeech, SystemSpeech};

/// Build the provider for a configured backend.
pub fn build_provider(backend: SpeechBackend, command: &str) -> Arc<dyn SpeechProvider> {
    match backend {
        SpeechBackend::Silent => Arc::new(SilentSpeech),
        SpeechBackend::System => Arc::new(SystemSpeech::new(command)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_provider_picks_backend() {
        assert_eq!(build_provider(SpeechBackend::Silent, "espeak-ng").name(), "silent");
        assert_eq!(build_provider(SpeechBackend::System, "say").name(), "say");
    }
}
