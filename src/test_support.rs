//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::catalog::Catalog;
use crate::core::state::App;
use crate::speech::{SpeechError, SpeechProvider, Utterance};

/// Creates a test App over the built-in catalog with 2500 points.
pub fn test_app() -> App {
    let catalog = Catalog::builtin().expect("built-in catalog must load");
    App::new(Arc::new(catalog), 2500)
}

/// A speech provider that remembers what it was asked to say.
#[derive(Default)]
pub struct RecordingSpeech {
    pub spoken: Mutex<Vec<Utterance>>,
}

impl RecordingSpeech {
    pub fn texts(&self) -> Vec<String> {
        self.spoken
            .lock()
            .map(|spoken| spoken.iter().map(|u| u.text.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SpeechProvider for RecordingSpeech {
    fn name(&self) -> &str {
        "recording"
    }

    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(utterance.clone());
        }
        Ok(())
    }
}
