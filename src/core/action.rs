//! # Actions
//!
//! Everything that can happen in EduQuest becomes an `Action`.
//! User picks a subject? That's `Action::SelectSubject(i)`.
//! The recording timer fires? That's `Action::RecordingFinished`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing any I/O the adapter should perform. No side effects
//! happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Actions that are not valid in the current view are ignored, so a stale
//! key press or a late timer can never corrupt the session.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::core::catalog::{ModuleContent, ModuleId, Question, QuestionSource};
use crate::core::shop::{self, PurchaseOutcome};
use crate::core::state::{
    App, ListeningState, Pace, QuizRun, ReadAloudState, SpeakingMode, View,
};
use crate::speech::Utterance;

/// Shown when a module has nothing to offer yet.
pub const COMING_SOON: &str = "Coming soon!";
pub const LISTENING_CORRECT: &str = "Correct! Good job!";
pub const LISTENING_WRONG: &str = "Try again!";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Drill-down
    SelectSubject(usize),
    SelectLevel(usize),
    SelectModule(ModuleId),
    SelectUnit(usize),
    Back,

    // Quiz run
    Answer(usize),
    Advance,
    QuitQuiz,
    CollectReward,

    // Shop, leaderboard, overlays
    Purchase(String),
    OpenShop,
    OpenLeaderboard,
    GoHome,
    ToggleMenu,
    ToggleProfile,
    DismissNotice,

    // Speaking lab
    SelectSpeakingMode(SpeakingMode),
    PlayReadAloud(Pace),
    ToggleTranslation,
    StartRecording,
    RecordingFinished,
    PlayListeningSound,
    PlaybackFinished,
    GuessAnimal(String),
    NextListening,

    Exit,
}

/// Which simulated activity a timer ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Recording,
    Playback,
}

impl TimerKind {
    /// The action posted back when the timer elapses.
    pub fn on_elapsed(&self) -> Action {
        match self {
            TimerKind::Recording => Action::RecordingFinished,
            TimerKind::Playback => Action::PlaybackFinished,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub duration: Duration,
}

/// Side effects requested by `update()`. The adapter performs them.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Exit,
    /// Speak, cutting off anything already playing. The optional timer
    /// starts alongside the speech.
    Speak {
        utterance: Utterance,
        timer: Option<Timer>,
    },
    StartTimer(Timer),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?} (view={:?})", action, app.view);

    // A notice lives until the next user action. Timer completions don't count.
    if !matches!(action, Action::RecordingFinished | Action::PlaybackFinished) {
        app.notice = None;
    }

    match action {
        Action::SelectSubject(index) => select_subject(app, index),
        Action::SelectLevel(index) => select_level(app, index),
        Action::SelectModule(module) => select_module(app, module),
        Action::SelectUnit(index) => select_unit(app, index),
        Action::Back => back(app),

        Action::Answer(index) => answer(app, index),
        Action::Advance => advance(app),
        Action::QuitQuiz => {
            if app.view == View::Quiz {
                info!("Quiz abandoned at question {}", app.quiz.question_index + 1);
                return_to_ancestor(app);
            }
            Effect::None
        }
        Action::CollectReward => collect_reward(app),

        Action::Purchase(item_id) => purchase(app, &item_id),
        Action::OpenShop => jump_to(app, View::Shop),
        Action::OpenLeaderboard => jump_to(app, View::Leaderboard),
        Action::GoHome => jump_to(app, View::Home),
        Action::ToggleMenu => {
            app.menu_open = !app.menu_open;
            app.profile_open = false;
            Effect::None
        }
        Action::ToggleProfile => {
            app.profile_open = !app.profile_open;
            app.menu_open = false;
            Effect::None
        }
        Action::DismissNotice => Effect::None,

        Action::SelectSpeakingMode(mode) => {
            if app.view == View::SpeakingHub && app.speaking_mode == SpeakingMode::Menu {
                enter_speaking_mode(app, mode);
            }
            Effect::None
        }
        Action::PlayReadAloud(pace) => play_read_aloud(app, pace),
        Action::ToggleTranslation => {
            if in_speaking_mode(app, SpeakingMode::ReadAloud) {
                app.read_aloud.show_translation = !app.read_aloud.show_translation;
            }
            Effect::None
        }
        Action::StartRecording => start_recording(app),
        Action::RecordingFinished => {
            if app.read_aloud.recording {
                app.read_aloud.recording = false;
                app.status_message = String::from("Recording saved");
            }
            Effect::None
        }
        Action::PlayListeningSound => play_listening_sound(app),
        Action::PlaybackFinished => {
            app.listening.playing = false;
            Effect::None
        }
        Action::GuessAnimal(animal) => guess_animal(app, animal),
        Action::NextListening => next_listening(app),

        Action::Exit => Effect::Exit,
    }
}

// ============================================================================
// Drill-down
// ============================================================================

fn select_subject(app: &mut App, index: usize) -> Effect {
    if app.view != View::Home {
        return Effect::None;
    }
    let Some(subject) = app.catalog.subject(index) else {
        warn!("SelectSubject({}) out of range", index);
        return Effect::None;
    };
    let is_menu = subject.is_menu();
    info!("Subject selected: {}", subject.id);

    app.menu_open = false;
    app.selection.clear();
    app.selection.subject = Some(index);
    if is_menu {
        app.view = View::Levels;
    } else {
        start_quiz(app, QuestionSource::Subject { subject: index });
    }
    Effect::None
}

fn select_level(app: &mut App, index: usize) -> Effect {
    if app.view != View::Levels {
        return Effect::None;
    }
    let Some(subject) = app.selection.subject else {
        return Effect::None;
    };
    if app.catalog.level(subject, index).is_none() {
        warn!("SelectLevel({}) out of range", index);
        return Effect::None;
    }
    app.selection.level = Some(index);
    app.selection.module = None;
    app.selection.unit = None;
    app.view = View::EnglishMenu;
    Effect::None
}

fn select_module(app: &mut App, module: ModuleId) -> Effect {
    if app.view != View::EnglishMenu {
        return Effect::None;
    }
    let (Some(subject), Some(level_index)) = (app.selection.subject, app.selection.level) else {
        return Effect::None;
    };
    let catalog = Arc::clone(&app.catalog);
    let Some(level) = catalog.level(subject, level_index) else {
        return Effect::None;
    };
    info!("Module selected: {} on {}", module, level.id);

    match module {
        ModuleId::Grammar => {
            app.selection.module = Some(module);
            app.selection.unit = None;
            app.view = View::GrammarUnits;
        }
        ModuleId::Speaking => {
            if level.speaking().is_none() {
                info!("No speaking content on {}", level.id);
                app.notice = Some(COMING_SOON.to_string());
                return Effect::None;
            }
            app.selection.module = Some(module);
            app.selection.unit = None;
            enter_speaking_mode(app, SpeakingMode::Menu);
            app.view = View::SpeakingHub;
        }
        ModuleId::Vocab | ModuleId::Phonics => {
            app.selection.module = Some(module);
            app.selection.unit = None;
            let source = match level.module(module) {
                ModuleContent::Questions { questions } if !questions.is_empty() => {
                    QuestionSource::Module {
                        subject,
                        level: level_index,
                        module,
                    }
                }
                _ => QuestionSource::Placeholder(Box::new(Question::placeholder(module))),
            };
            start_quiz(app, source);
        }
    }
    Effect::None
}

fn select_unit(app: &mut App, index: usize) -> Effect {
    if app.view != View::GrammarUnits {
        return Effect::None;
    }
    let (Some(subject), Some(level)) = (app.selection.subject, app.selection.level) else {
        return Effect::None;
    };
    if app.catalog.unit(subject, level, index).is_none() {
        warn!("SelectUnit({}) out of range", index);
        return Effect::None;
    }
    app.selection.unit = Some(index);
    start_quiz(
        app,
        QuestionSource::Unit {
            subject,
            level,
            unit: index,
        },
    );
    Effect::None
}

fn back(app: &mut App) -> Effect {
    // Overlays close before any navigation happens
    if app.menu_open || app.profile_open {
        app.menu_open = false;
        app.profile_open = false;
        return Effect::None;
    }

    match app.view {
        View::Home | View::Result => {}
        View::Levels | View::Shop | View::Leaderboard => {
            app.selection.clear();
            app.view = View::Home;
        }
        View::EnglishMenu => {
            app.selection.level = None;
            app.selection.module = None;
            app.selection.unit = None;
            app.view = View::Levels;
        }
        View::GrammarUnits => {
            app.selection.module = None;
            app.selection.unit = None;
            app.view = View::EnglishMenu;
        }
        View::SpeakingHub => {
            if app.speaking_mode == SpeakingMode::Menu {
                app.selection.module = None;
                app.view = View::EnglishMenu;
            }
            enter_speaking_mode(app, SpeakingMode::Menu);
        }
        View::Quiz => return_to_ancestor(app),
    }
    Effect::None
}

/// Leave the shop or leaderboard or home page fresh: the drill-down path
/// and any quiz run are discarded.
fn jump_to(app: &mut App, view: View) -> Effect {
    app.menu_open = false;
    app.profile_open = false;
    app.selection.clear();
    app.quiz = QuizRun::default();
    enter_speaking_mode(app, SpeakingMode::Menu);
    app.view = view;
    Effect::None
}

// ============================================================================
// Quiz run
// ============================================================================

fn start_quiz(app: &mut App, source: QuestionSource) {
    app.quiz = QuizRun::start(source);
    app.view = View::Quiz;
    info!("Quiz started with {} question(s)", app.questions().len());
}

fn answer(app: &mut App, index: usize) -> Effect {
    if app.view != View::Quiz || app.quiz.explanation_shown {
        return Effect::None;
    }
    let Some(question) = app.current_question() else {
        return Effect::None;
    };
    if index >= question.options.len() {
        debug!("Answer({}) ignored: question has {} options", index, question.options.len());
        return Effect::None;
    }
    let correct = question.is_correct(index);
    let spoken = question.spoken_feedback(index).map(str::to_string);

    app.quiz.selected_option = Some(index);
    app.quiz.explanation_shown = true;
    if correct {
        app.quiz.score += 1;
    }
    debug!(
        "Answered question {} with option {} (correct={}, score={})",
        app.quiz.question_index + 1,
        index,
        correct,
        app.quiz.score
    );

    match spoken {
        Some(text) => Effect::Speak {
            utterance: app.voice.utterance(text, Pace::Normal.rate()),
            timer: None,
        },
        None => Effect::None,
    }
}

fn advance(app: &mut App) -> Effect {
    if app.view != View::Quiz || !app.quiz.explanation_shown {
        return Effect::None;
    }
    if app.is_last_question() {
        let reward = app.pending_reward();
        info!(
            "Quiz finished: {}/{} ({}%)",
            app.quiz.score,
            app.total_questions(),
            reward.percentage
        );
        app.view = View::Result;
    } else {
        app.quiz.question_index += 1;
        app.quiz.selected_option = None;
        app.quiz.explanation_shown = false;
    }
    Effect::None
}

fn collect_reward(app: &mut App) -> Effect {
    if app.view != View::Result {
        return Effect::None;
    }
    let reward = app.pending_reward();
    app.points = app.points.saturating_add(reward.total);
    app.last_reward = Some(reward);
    app.status_message = if reward.is_perfect() {
        format!("Perfect! +{} points", reward.total)
    } else {
        format!("+{} points", reward.total)
    };
    info!("Collected {} points (balance {})", reward.total, app.points);
    return_to_ancestor(app);
    Effect::None
}

/// Close the quiz run and go back to where it was launched from.
fn return_to_ancestor(app: &mut App) {
    app.quiz = QuizRun::default();
    if app.selection.unit.take().is_some() {
        app.view = View::GrammarUnits;
    } else if app.selection.level.is_some() {
        app.selection.module = None;
        app.view = View::EnglishMenu;
    } else {
        app.selection.clear();
        app.view = View::Home;
    }
}

// ============================================================================
// Shop
// ============================================================================

fn purchase(app: &mut App, item_id: &str) -> Effect {
    if app.view != View::Shop {
        return Effect::None;
    }
    let catalog = Arc::clone(&app.catalog);
    let outcome = match catalog.shop_item(item_id) {
        Some(item) => shop::purchase(&mut app.points, &mut app.owned_items, item),
        None => {
            warn!("Purchase of unknown item '{}'", item_id);
            PurchaseOutcome::UnknownItem
        }
    };
    let name = catalog
        .shop_item(item_id)
        .map(|item| item.name.as_str())
        .unwrap_or(item_id);
    app.status_message = match outcome {
        PurchaseOutcome::Purchased { remaining } => {
            format!("Bought {name}! {remaining} points left")
        }
        PurchaseOutcome::AlreadyOwned => format!("You already own {name}"),
        PurchaseOutcome::InsufficientFunds { short_by } => {
            format!("Need {short_by} more points for {name}")
        }
        PurchaseOutcome::UnknownItem => format!("No such item: {item_id}"),
    };
    Effect::None
}

// ============================================================================
// Speaking lab
// ============================================================================

fn in_speaking_mode(app: &App, mode: SpeakingMode) -> bool {
    app.view == View::SpeakingHub && app.speaking_mode == mode && app.active_speaking().is_some()
}

/// Switch sub-screen, resetting both activities.
fn enter_speaking_mode(app: &mut App, mode: SpeakingMode) {
    app.speaking_mode = mode;
    app.read_aloud = ReadAloudState::default();
    app.listening = ListeningState::default();
}

fn play_read_aloud(app: &mut App, pace: Pace) -> Effect {
    if !in_speaking_mode(app, SpeakingMode::ReadAloud) {
        return Effect::None;
    }
    let Some(text) = app
        .active_speaking()
        .map(|content| content.read_aloud.text.clone())
    else {
        return Effect::None;
    };
    app.status_message = format!("Playing ({})", pace.label());
    Effect::Speak {
        utterance: app.voice.utterance(text, pace.rate()),
        timer: None,
    }
}

fn start_recording(app: &mut App) -> Effect {
    if !in_speaking_mode(app, SpeakingMode::ReadAloud) || app.read_aloud.recording {
        return Effect::None;
    }
    app.read_aloud.recording = true;
    app.status_message = String::from("Recording...");
    Effect::StartTimer(Timer {
        kind: TimerKind::Recording,
        duration: app.timing.recording,
    })
}

fn play_listening_sound(app: &mut App) -> Effect {
    if !in_speaking_mode(app, SpeakingMode::ListeningGame) {
        return Effect::None;
    }
    let Some(text) = app.current_clue().map(|clue| clue.sound_text.clone()) else {
        return Effect::None;
    };
    app.listening.playing = true;
    Effect::Speak {
        utterance: app.voice.utterance(text, Pace::Normal.rate()),
        timer: Some(Timer {
            kind: TimerKind::Playback,
            duration: app.timing.playback,
        }),
    }
}

fn guess_animal(app: &mut App, animal: String) -> Effect {
    if !in_speaking_mode(app, SpeakingMode::ListeningGame) || app.listening.guess.is_some() {
        return Effect::None;
    }
    let Some(clue) = app.current_clue() else {
        return Effect::None;
    };
    if !clue.options.iter().any(|option| option.key() == animal) {
        debug!("Guess '{}' is not an option for clue {}", animal, clue.id);
        return Effect::None;
    }
    let correct = animal == clue.correct_animal;
    info!("Listening clue {}: guessed {} (correct={})", clue.id, animal, correct);

    app.listening.guess = Some(animal);
    let feedback = if correct {
        LISTENING_CORRECT
    } else {
        LISTENING_WRONG
    };
    Effect::Speak {
        utterance: app.voice.utterance(feedback, Pace::Normal.rate()),
        timer: None,
    }
}

fn next_listening(app: &mut App) -> Effect {
    if !in_speaking_mode(app, SpeakingMode::ListeningGame) || app.listening.guess.is_none() {
        return Effect::None;
    }
    let clue_count = app
        .active_speaking()
        .map(|content| content.listening_game.clues.len())
        .unwrap_or(0);
    if app.listening.clue_index + 1 < clue_count {
        app.listening = ListeningState {
            clue_index: app.listening.clue_index + 1,
            ..Default::default()
        };
    } else {
        info!("Listening game finished");
        app.status_message = String::from("Listening game complete!");
        enter_speaking_mode(app, SpeakingMode::Menu);
    }
    Effect::None
}
