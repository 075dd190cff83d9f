//! Performs the side effects `update()` asks for: speech and timers.
//!
//! Every task posts its follow-up action back through the same channel the
//! event loop drains, so the reducer stays the only place state changes.

use log::{debug, info, warn};
use std::sync::{Arc, mpsc};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, Timer, TimerKind};
use crate::speech::{SpeechProvider, Utterance};

pub struct EffectRunner {
    provider: Arc<dyn SpeechProvider>,
    tx: mpsc::Sender<Action>,
    /// The utterance currently playing, if any. New speech cuts it off.
    speech: Option<AbortHandle>,
    /// At most one pending timer per kind.
    timers: Vec<(TimerKind, AbortHandle)>,
}

impl EffectRunner {
    pub fn new(provider: Arc<dyn SpeechProvider>, tx: mpsc::Sender<Action>) -> Self {
        Self {
            provider,
            tx,
            speech: None,
            timers: Vec::new(),
        }
    }

    /// Perform `effect`. Returns true when the app should exit.
    pub fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Exit => true,
            Effect::Speak { utterance, timer } => {
                self.speak(utterance);
                if let Some(timer) = timer {
                    self.start_timer(timer);
                }
                false
            }
            Effect::StartTimer(timer) => {
                self.start_timer(timer);
                false
            }
        }
    }

    fn speak(&mut self, utterance: Utterance) {
        if let Some(previous) = self.speech.take() {
            previous.abort();
        }
        debug!("Speaking {:?} at rate {:.2}", utterance.text, utterance.rate);
        let provider = self.provider.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = provider.speak(&utterance).await {
                warn!("Speech via {} failed: {}", provider.name(), e);
            }
        });
        self.speech = Some(handle.abort_handle());
    }

    fn start_timer(&mut self, timer: Timer) {
        self.timers.retain(|(kind, handle)| {
            if *kind == timer.kind {
                handle.abort();
                return false;
            }
            !handle.is_finished()
        });
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timer.duration).await;
            if tx.send(timer.kind.on_elapsed()).is_err() {
                warn!("Failed to post {:?} timer: receiver dropped", timer.kind);
            }
        });
        self.timers.push((timer.kind, handle.abort_handle()));
    }

    /// Stop speech and pending timers.
    pub fn shutdown(&mut self) {
        let pending = self.timers.len() + usize::from(self.speech.is_some());
        if let Some(speech) = self.speech.take() {
            speech.abort();
        }
        for (_, timer) in self.timers.drain(..) {
            timer.abort();
        }
        info!("Effect runner stopped ({} tasks aborted)", pending);
    }
}
