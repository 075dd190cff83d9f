//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing on screen animates, so the loop only draws after an input event,
//! a resize, or an action posted by a background task (speech timers).
//! While a recording or playback timer is pending the poll timeout drops to
//! 100ms so the timer's action lands promptly; otherwise the loop sleeps up
//! to 500ms between polls.

mod component;
mod components;
mod effects;
mod event;
mod keymap;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::Hide;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::update;
use crate::core::catalog::Catalog;
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, QuizStatus, SpeakingMode, View};
use crate::speech::build_provider;
use crate::tui::components::PickerState;
use crate::tui::effects::EffectRunner;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Identifies "the same screen" for highlight purposes. When it changes the
/// highlight jumps back to the first row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScreenKey {
    view: View,
    speaking_mode: SpeakingMode,
    subject: Option<usize>,
    level: Option<usize>,
    question_index: usize,
    quiz_status: QuizStatus,
    clue_index: usize,
    guessed: bool,
    menu_open: bool,
    profile_open: bool,
}

impl ScreenKey {
    fn of(app: &App) -> Self {
        Self {
            view: app.view,
            speaking_mode: app.speaking_mode,
            subject: app.selection.subject,
            level: app.selection.level,
            question_index: app.quiz.question_index,
            quiz_status: app.quiz_status(),
            clue_index: app.listening.clue_index,
            guessed: app.listening.guess.is_some(),
            menu_open: app.menu_open,
            profile_open: app.profile_open,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Highlight for whichever list is showing. Only one list is ever
    /// interactive at a time, so one state serves every screen.
    pub picker: PickerState,
    screen: Option<ScreenKey>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            picker: PickerState::default(),
            screen: None,
        }
    }

    /// Align the highlight with the screen `app` is showing. Call after
    /// every `update()` and before every draw.
    pub fn sync(&mut self, app: &App) {
        let key = ScreenKey::of(app);
        let len = keymap::item_count(app);
        if self.screen.as_ref() == Some(&key) {
            self.picker.set_len(len);
        } else {
            debug!("Screen changed to {:?}, resetting highlight", key.view);
            self.picker.reset(len);
            self.screen = Some(key);
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Esc arrive without the usual delay.
        // Terminals that don't support it ignore the sequence.
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
}

/// Poll timeout: short while a speech timer is pending, long when idle.
fn poll_timeout(app: &App) -> Duration {
    if app.read_aloud.recording || app.listening.playing {
        Duration::from_millis(100)
    } else {
        Duration::from_millis(500)
    }
}

pub fn run(config: ResolvedConfig, catalog: Catalog) -> std::io::Result<()> {
    let provider = build_provider(config.speech_backend, &config.speech_command);
    info!("Speech provider: {}", provider.name());
    let mut app = App::from_config(Arc::new(catalog), &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut effects = EffectRunner::new(provider, tx);

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            tui.sync(&app);
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(poll_timeout(&app));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            tui.sync(&app);
            let Some(action) = keymap::handle_event(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Key {:?} -> {:?}", event, action);
            let effect = update(&mut app, action);
            if effects.apply(effect) {
                break 'main;
            }
        }

        // Actions posted by speech and timer tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if effects.apply(effect) {
                break 'main;
            }
        }
    }

    effects.shutdown();
    info!("Exiting with {} points", app.points);

    ratatui::restore();
    Ok(())
}
