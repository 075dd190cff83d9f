//! # Application State
//!
//! Core session state for EduQuest. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<Catalog>           // read-only content
//! ├── view: View                      // which screen is showing
//! ├── selection: Selection            // subject → level → module → unit path
//! ├── quiz: QuizRun                   // active question set and progress
//! ├── speaking_mode: SpeakingMode     // sub-screen inside the speaking lab
//! ├── read_aloud / listening          // speaking-lab activity state
//! ├── points: u32                     // spendable balance
//! ├── owned_items: BTreeSet<String>   // purchased shop item ids
//! ├── menu_open / profile_open        // overlays
//! ├── notice: Option<String>          // transient "Coming soon!" banner
//! ├── status_message: String          // status bar text
//! └── voice / timing                  // speech and timer settings
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::catalog::{
    Catalog, Level, ListeningClue, ModuleId, Question, QuestionSource, SpeakingContent, Subject,
    Unit,
};
use crate::core::config::{ResolvedConfig, Timing};
use crate::core::scoring::{self, Reward};
use crate::speech::Voice;

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Levels,
    EnglishMenu,
    GrammarUnits,
    SpeakingHub,
    Quiz,
    Result,
    Shop,
    Leaderboard,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Levels => "Levels",
            View::EnglishMenu => "Modules",
            View::GrammarUnits => "Grammar",
            View::SpeakingHub => "Speaking Lab",
            View::Quiz => "Quiz",
            View::Result => "Results",
            View::Shop => "Gift Shop",
            View::Leaderboard => "Leaderboard",
        }
    }
}

/// The drill-down path, as indices into the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub subject: Option<usize>,
    pub level: Option<usize>,
    pub module: Option<ModuleId>,
    pub unit: Option<usize>,
}

impl Selection {
    pub fn clear(&mut self) {
        *self = Selection::default();
    }
}

/// Sub-screens of the speaking lab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeakingMode {
    #[default]
    Menu,
    ReadAloud,
    ListeningGame,
}

/// Playback speed for the read-aloud passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Slow,
    Normal,
    Fast,
}

impl Pace {
    pub const ALL: [Pace; 3] = [Pace::Slow, Pace::Normal, Pace::Fast];

    /// Multiplier applied to the configured voice rate.
    pub fn rate(&self) -> f32 {
        match self {
            Pace::Slow => 0.7,
            Pace::Normal => 1.0,
            Pace::Fast => 1.2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pace::Slow => "Slow",
            Pace::Normal => "Normal",
            Pace::Fast => "Fast",
        }
    }
}

/// Progress through the active question set.
///
/// `source == None` means no quiz is running.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizRun {
    pub source: Option<QuestionSource>,
    pub question_index: usize,
    pub score: u32,
    pub selected_option: Option<usize>,
    pub explanation_shown: bool,
}

impl QuizRun {
    pub fn start(source: QuestionSource) -> Self {
        Self {
            source: Some(source),
            ..Default::default()
        }
    }
}

/// What the quiz screen should show for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    /// The question set is empty.
    NoQuestions,
    /// Waiting for an answer.
    Asking,
    /// Answered; the explanation is showing.
    Explaining,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadAloudState {
    pub show_translation: bool,
    /// A simulated recording is in progress.
    pub recording: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListeningState {
    pub clue_index: usize,
    /// The accepted guess for the current clue. One guess per clue.
    pub guess: Option<String>,
    /// The clue's sound is playing.
    pub playing: bool,
}

pub struct App {
    pub catalog: Arc<Catalog>,
    pub view: View,
    pub selection: Selection,
    pub quiz: QuizRun,
    pub speaking_mode: SpeakingMode,
    pub read_aloud: ReadAloudState,
    pub listening: ListeningState,
    pub points: u32,
    pub owned_items: BTreeSet<String>,
    pub menu_open: bool,
    pub profile_open: bool,
    /// Shown until the next action.
    pub notice: Option<String>,
    pub status_message: String,
    /// The reward most recently collected, for the status bar.
    pub last_reward: Option<Reward>,
    pub voice: Voice,
    pub timing: Timing,
    pub started_at: DateTime<Local>,
}

impl App {
    pub fn new(catalog: Arc<Catalog>, starting_points: u32) -> Self {
        Self {
            catalog,
            view: View::Home,
            selection: Selection::default(),
            quiz: QuizRun::default(),
            speaking_mode: SpeakingMode::default(),
            read_aloud: ReadAloudState::default(),
            listening: ListeningState::default(),
            points: starting_points,
            owned_items: BTreeSet::new(),
            menu_open: false,
            profile_open: false,
            notice: None,
            status_message: String::from("Welcome to EduQuest!"),
            last_reward: None,
            voice: Voice::default(),
            timing: Timing::default(),
            started_at: Local::now(),
        }
    }

    pub fn from_config(catalog: Arc<Catalog>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(catalog, config.starting_points);
        app.voice = config.voice.clone();
        app.timing = config.timing;
        app
    }

    /// The active question set. Empty when no quiz is running.
    pub fn questions(&self) -> &[Question] {
        match &self.quiz.source {
            Some(source) => self.catalog.questions(source),
            None => &[],
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions().get(self.quiz.question_index)
    }

    pub fn total_questions(&self) -> u32 {
        u32::try_from(self.questions().len()).unwrap_or(u32::MAX)
    }

    pub fn quiz_status(&self) -> QuizStatus {
        if self.current_question().is_none() {
            QuizStatus::NoQuestions
        } else if self.quiz.explanation_shown {
            QuizStatus::Explaining
        } else {
            QuizStatus::Asking
        }
    }

    /// What collecting the current run would earn.
    pub fn pending_reward(&self) -> Reward {
        scoring::reward(self.quiz.score, self.total_questions())
    }

    pub fn is_last_question(&self) -> bool {
        self.quiz.question_index + 1 >= self.questions().len()
    }

    pub fn active_subject(&self) -> Option<&Subject> {
        self.catalog.subject(self.selection.subject?)
    }

    pub fn active_level(&self) -> Option<&Level> {
        self.catalog
            .level(self.selection.subject?, self.selection.level?)
    }

    pub fn active_unit(&self) -> Option<&Unit> {
        self.catalog.unit(
            self.selection.subject?,
            self.selection.level?,
            self.selection.unit?,
        )
    }

    pub fn active_speaking(&self) -> Option<&SpeakingContent> {
        self.active_level()?.speaking()
    }

    pub fn current_clue(&self) -> Option<&ListeningClue> {
        self.active_speaking()?
            .listening_game
            .clues
            .get(self.listening.clue_index)
    }

    /// Whether the accepted guess for the current clue is right.
    pub fn listening_guess_correct(&self) -> Option<bool> {
        let guess = self.listening.guess.as_deref()?;
        let clue = self.current_clue()?;
        Some(guess == clue.correct_animal)
    }

    pub fn owns(&self, item_id: &str) -> bool {
        self.owned_items.contains(item_id)
    }

    /// Breadcrumb of the drill-down path, e.g. `English Hub › Level P`.
    pub fn breadcrumb(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(subject) = self.active_subject() {
            parts.push(&subject.title);
        }
        if let Some(level) = self.active_level() {
            parts.push(&level.title);
        }
        if let Some(module) = self.selection.module {
            parts.push(module.title());
        }
        if let Some(unit) = self.active_unit() {
            parts.push(unit.short_title());
        }
        parts.join(" › ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.view, View::Home);
        assert_eq!(app.points, 2500);
        assert!(app.owned_items.is_empty());
        assert!(app.quiz.source.is_none());
        assert_eq!(app.status_message, "Welcome to EduQuest!");
    }

    #[test]
    fn test_no_quiz_means_no_questions() {
        let app = test_app();
        assert!(app.questions().is_empty());
        assert_eq!(app.quiz_status(), QuizStatus::NoQuestions);
        assert_eq!(app.pending_reward().total, 0);
    }

    #[test]
    fn test_questions_follow_source() {
        let mut app = test_app();
        app.quiz = QuizRun::start(QuestionSource::Subject { subject: 2 });
        assert_eq!(app.questions().len(), 1);
        assert_eq!(app.current_question().unwrap().id, "m1");
        assert_eq!(app.quiz_status(), QuizStatus::Asking);
        assert!(app.is_last_question());
    }

    #[test]
    fn test_breadcrumb_follows_selection() {
        let mut app = test_app();
        app.selection = Selection {
            subject: Some(0),
            level: Some(1),
            module: Some(ModuleId::Grammar),
            unit: Some(0),
        };
        let crumb = app.breadcrumb();
        assert_eq!(crumb, "英語冒險島 › Daily Words › Grammar › Unit 8");
    }

    #[test]
    fn test_pace_rates() {
        assert_eq!(Pace::Slow.rate(), 0.7);
        assert_eq!(Pace::Normal.rate(), 1.0);
        assert_eq!(Pace::Fast.rate(), 1.2);
    }

    #[test]
    fn test_from_config_copies_settings() {
        use crate::core::config::{CliOverrides, EduQuestConfig, resolve_with_env};
        let cli = CliOverrides {
            points: Some(7),
            ..Default::default()
        };
        let config = resolve_with_env(&EduQuestConfig::default(), &cli, |_| None);
        let app = App::from_config(Arc::new(Catalog::default()), &config);
        assert_eq!(app.points, 7);
        assert_eq!(app.timing, config.timing);
    }
}
