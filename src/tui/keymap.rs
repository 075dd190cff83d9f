//! # Key Map
//!
//! Turns `TuiEvent`s into core `Action`s for the screen that is showing.
//! Cursor movement is presentation state and stays in `TuiState`; only
//! activations reach the reducer.
//!
//! | Key            | Where                  | Action                     |
//! |----------------|------------------------|----------------------------|
//! | ↑ / ↓          | any list               | move highlight             |
//! | Enter          | any list               | activate highlighted row   |
//! | 1-4, a-d       | quiz                   | answer                     |
//! | 1 / 2 / 3      | read aloud             | play slow / normal / fast  |
//! | t / r          | read aloud             | translation / record       |
//! | space, 1-3     | listening game         | play clue / guess          |
//! | q              | quiz                   | quit the run               |
//! | Enter / Esc    | notice showing         | dismiss (other keys inert) |
//! | Esc            | anywhere               | back                       |
//! | m / p          | anywhere               | menu / profile overlay     |
//! | s / l / h      | anywhere               | shop / leaderboard / home  |
//! | Ctrl+C         | anywhere               | exit                       |

use crate::core::action::Action;
use crate::core::catalog::ModuleId;
use crate::core::state::{App, Pace, QuizStatus, SpeakingMode, View};
use crate::tui::component::EventHandler;
use crate::tui::components::MenuEntry;
use crate::tui::event::TuiEvent;
use crate::tui::TuiState;

/// Speaking-lab missions, in menu order.
pub const MISSIONS: [SpeakingMode; 2] = [SpeakingMode::ReadAloud, SpeakingMode::ListeningGame];

/// How many selectable rows the current screen shows.
pub fn item_count(app: &App) -> usize {
    if app.menu_open {
        return MenuEntry::ALL.len();
    }
    if app.profile_open {
        return 0;
    }
    match app.view {
        View::Home => app.catalog.subjects.len(),
        View::Levels => app.active_subject().map(|s| s.levels().len()).unwrap_or(0),
        View::EnglishMenu => ModuleId::ALL.len(),
        View::GrammarUnits => app.active_level().map(|l| l.units().len()).unwrap_or(0),
        View::SpeakingHub => match app.speaking_mode {
            SpeakingMode::Menu => MISSIONS.len(),
            SpeakingMode::ReadAloud => 0,
            SpeakingMode::ListeningGame if app.listening.guess.is_none() => {
                app.current_clue().map(|c| c.options.len()).unwrap_or(0)
            }
            SpeakingMode::ListeningGame => 0,
        },
        View::Quiz => match app.quiz_status() {
            QuizStatus::Asking => app.current_question().map(|q| q.options.len()).unwrap_or(0),
            QuizStatus::Explaining | QuizStatus::NoQuestions => 0,
        },
        View::Shop => app.catalog.shop.len(),
        View::Result | View::Leaderboard => 0,
    }
}

/// Map an event to an action, moving the highlight as a side effect.
pub fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Exit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    // A notice covers the screen; keys below it stay inert until it closes
    if app.notice.is_some() {
        return match event {
            TuiEvent::Submit | TuiEvent::Escape => Some(Action::DismissNotice),
            _ => None,
        };
    }
    if let TuiEvent::Escape = event {
        return Some(Action::Back);
    }

    if app.menu_open {
        return match tui.picker.handle_event(event) {
            Some(index) => MenuEntry::ALL.get(index).map(|entry| match entry {
                MenuEntry::Leaderboard => Action::OpenLeaderboard,
                MenuEntry::Shop => Action::OpenShop,
                MenuEntry::Profile => Action::ToggleProfile,
            }),
            None => global_shortcut(event),
        };
    }
    if app.profile_open {
        return match event {
            TuiEvent::Submit => Some(Action::ToggleProfile),
            _ => global_shortcut(event),
        };
    }

    let screen_action = match app.view {
        View::Quiz => quiz_key(app, tui, event),
        View::SpeakingHub => speaking_key(app, tui, event),
        View::Result => matches!(event, TuiEvent::Submit).then_some(Action::CollectReward),
        View::Leaderboard => None,
        _ => tui
            .picker
            .handle_event(event)
            .and_then(|index| activate_row(app, index)),
    };
    screen_action.or_else(|| global_shortcut(event))
}

/// Shortcuts available on every screen.
fn global_shortcut(event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar('m') => Some(Action::ToggleMenu),
        TuiEvent::InputChar('p') => Some(Action::ToggleProfile),
        TuiEvent::InputChar('s') => Some(Action::OpenShop),
        TuiEvent::InputChar('l') => Some(Action::OpenLeaderboard),
        TuiEvent::InputChar('h') => Some(Action::GoHome),
        _ => None,
    }
}

/// Enter on a row of a list screen.
fn activate_row(app: &App, index: usize) -> Option<Action> {
    match app.view {
        View::Home => Some(Action::SelectSubject(index)),
        View::Levels => Some(Action::SelectLevel(index)),
        View::EnglishMenu => ModuleId::ALL.get(index).copied().map(Action::SelectModule),
        View::GrammarUnits => Some(Action::SelectUnit(index)),
        View::Shop => app
            .catalog
            .shop
            .get(index)
            .map(|item| Action::Purchase(item.id.clone())),
        _ => None,
    }
}

fn quiz_key(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match app.quiz_status() {
        QuizStatus::Asking => {
            if let TuiEvent::InputChar(c) = event
                && let Some(index) = answer_index(*c)
            {
                return Some(Action::Answer(index));
            }
            if let TuiEvent::InputChar('q') = event {
                return Some(Action::QuitQuiz);
            }
            tui.picker.handle_event(event).map(Action::Answer)
        }
        QuizStatus::Explaining => match event {
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(Action::Advance),
            TuiEvent::InputChar('q') => Some(Action::QuitQuiz),
            _ => None,
        },
        QuizStatus::NoQuestions => match event {
            TuiEvent::Submit => Some(Action::GoHome),
            TuiEvent::InputChar('q') => Some(Action::QuitQuiz),
            _ => None,
        },
    }
}

/// `1`-`4` or `a`-`d` pick an answer.
fn answer_index(c: char) -> Option<usize> {
    match c {
        '1'..='9' => Some(c as usize - '1' as usize),
        'a'..='d' => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

fn speaking_key(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match app.speaking_mode {
        SpeakingMode::Menu => tui
            .picker
            .handle_event(event)
            .and_then(|index| MISSIONS.get(index).copied())
            .map(Action::SelectSpeakingMode),
        SpeakingMode::ReadAloud => match event {
            TuiEvent::InputChar('1') => Some(Action::PlayReadAloud(Pace::Slow)),
            TuiEvent::InputChar('2') | TuiEvent::Submit => {
                Some(Action::PlayReadAloud(Pace::Normal))
            }
            TuiEvent::InputChar('3') => Some(Action::PlayReadAloud(Pace::Fast)),
            TuiEvent::InputChar('t') => Some(Action::ToggleTranslation),
            TuiEvent::InputChar('r') => Some(Action::StartRecording),
            _ => None,
        },
        SpeakingMode::ListeningGame => {
            if app.listening.guess.is_some() {
                return matches!(event, TuiEvent::Submit).then_some(Action::NextListening);
            }
            let clue = app.current_clue()?;
            let guess_at = |index: usize| {
                clue.options
                    .get(index)
                    .map(|option| Action::GuessAnimal(option.key().to_string()))
            };
            match event {
                TuiEvent::InputChar(' ') => Some(Action::PlayListeningSound),
                TuiEvent::InputChar(c @ '1'..='9') => guess_at(*c as usize - '1' as usize),
                _ => tui.picker.handle_event(event).and_then(guess_at),
            }
        }
    }
}

/// One-line key hints for the footer.
pub fn help_text(app: &App) -> &'static str {
    if app.notice.is_some() {
        return " Enter/Esc Dismiss ";
    }
    if app.menu_open {
        return " ↑↓ Move  Enter Open  Esc Close ";
    }
    if app.profile_open {
        return " Enter/Esc Close ";
    }
    match app.view {
        View::Home => " ↑↓ Move  Enter Open  m Menu  s Shop  l Leaderboard  Ctrl+C Exit ",
        View::Levels | View::EnglishMenu | View::GrammarUnits => {
            " ↑↓ Move  Enter Open  Esc Back  h Home  m Menu "
        }
        View::SpeakingHub => match app.speaking_mode {
            SpeakingMode::Menu => " ↑↓ Move  Enter Start  Esc Back ",
            SpeakingMode::ReadAloud => " 1/2/3 Play  t Translation  r Record  Esc Back ",
            SpeakingMode::ListeningGame => " space Play  1-3 Guess  Enter Next  Esc Back ",
        },
        View::Quiz => match app.quiz_status() {
            QuizStatus::Asking => " ↑↓ Move  Enter/1-4 Answer  q Quit ",
            QuizStatus::Explaining => " Enter Continue  q Quit ",
            QuizStatus::NoQuestions => " Enter Home  Esc Back ",
        },
        View::Result => " Enter Collect points ",
        View::Shop => " ↑↓ Move  Enter Buy  Esc Back ",
        View::Leaderboard => " Esc Back  h Home ",
    }
}
