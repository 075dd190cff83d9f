//! Speech backend that only writes utterances to the log.
//!
//! Default backend: the app stays fully usable on machines without a
//! synthesizer, and the log shows what would have been said.

use async_trait::async_trait;
use log::info;

use crate::speech::{SpeechError, SpeechProvider, Utterance};

#[derive(Debug, Default)]
pub struct SilentSpeech;

#[async_trait]
impl SpeechProvider for SilentSpeech {
    fn name(&self) -> &str {
        "silent"
    }

    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        info!(
            "[speech] \"{}\" (lang={}, rate={:.2}, pitch={:.2})",
            utterance.text, utterance.language, utterance.rate, utterance.pitch
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::Voice;

    #[test]
    fn test_silent_speech_always_succeeds() {
        let utterance = Voice::default().utterance("Correct! Good job!", 1.0);
        let result = tokio_test::block_on(SilentSpeech.speak(&utterance));
        assert!(result.is_ok());
        assert_eq!(SilentSpeech.name(), "silent");
    }
}
