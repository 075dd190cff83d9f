use crate::core::catalog::{ModuleContent, ModuleId};
use crate::core::leaderboard;
use crate::core::shop;
use crate::core::state::{App, QuizStatus, SpeakingMode, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    LeaderboardTable, ListeningPanel, MenuOverlay, NoQuestionsCard, NoticeBanner, Picker,
    PickerRow, ProfileOverlay, QuizCard, ReadAloudPanel, ResultCard, TitleBar, centered_rect,
};
use crate::tui::keymap::{self, MISSIONS};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let location = match app.breadcrumb() {
        crumb if crumb.is_empty() => app.view.title().to_string(),
        crumb => crumb,
    };
    TitleBar::new(location, app.points, app.status_message.clone()).render(frame, title_area);

    match app.view {
        View::Home => draw_home(frame, main_area, app, tui),
        View::Levels => draw_levels(frame, main_area, app, tui),
        View::EnglishMenu => draw_modules(frame, main_area, app, tui),
        View::GrammarUnits => draw_units(frame, main_area, app, tui),
        View::SpeakingHub => draw_speaking(frame, main_area, app, tui),
        View::Quiz => draw_quiz(frame, main_area, app, tui),
        View::Result => {
            let mut card = ResultCard {
                score: app.quiz.score,
                total: app.total_questions(),
                reward: app.pending_reward(),
            };
            card.render(frame, centered_rect(60, 60, main_area));
        }
        View::Shop => draw_shop(frame, main_area, app, tui),
        View::Leaderboard => {
            let mut table = LeaderboardTable {
                standings: leaderboard::standings(&app.catalog.leaderboard, app.points),
            };
            table.render(frame, main_area);
        }
    }

    frame.render_widget(
        Line::styled(keymap::help_text(app), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlays last, on top of everything
    if let Some(notice) = &app.notice {
        NoticeBanner { text: notice }.render(frame, main_area);
    }
    if app.menu_open {
        MenuOverlay {
            selected: tui.picker.selected,
        }
        .render(frame, main_area);
    }
    if app.profile_open {
        profile_overlay(app).render(frame, main_area);
    }
}

fn draw_home(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let rows = app
        .catalog
        .subjects
        .iter()
        .map(|subject| PickerRow::new(subject.title.clone(), subject.subtitle.clone()))
        .collect();
    Picker::new("Choose a subject", rows, &mut tui.picker).render(frame, area);
}

fn draw_levels(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let Some(subject) = app.active_subject() else {
        return;
    };
    let rows = subject
        .levels()
        .iter()
        .map(|level| {
            PickerRow::new(
                format!("{} · {}", level.code, level.title),
                level.grade.clone(),
            )
        })
        .collect();
    let title = format!("{} · Levels", subject.title);
    Picker::new(&title, rows, &mut tui.picker).render(frame, area);
}

/// One-line summary of what a module holds.
fn module_detail(content: &ModuleContent, module: ModuleId) -> String {
    match content {
        ModuleContent::Questions { questions } if !questions.is_empty() => {
            format!("{} questions", questions.len())
        }
        ModuleContent::Units { units } if !units.is_empty() => format!("{} units", units.len()),
        ModuleContent::Speaking(_) => "Read aloud · Listening".to_string(),
        _ if module == ModuleId::Speaking => "Coming soon".to_string(),
        _ => "Under construction".to_string(),
    }
}

fn draw_modules(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let Some(level) = app.active_level() else {
        return;
    };
    let rows = ModuleId::ALL
        .iter()
        .map(|&module| {
            let content = level.module(module);
            let unavailable = module == ModuleId::Speaking && level.speaking().is_none();
            PickerRow::new(module.title(), module_detail(content, module)).dimmed(unavailable)
        })
        .collect();
    let title = format!("{} · {}", level.code, level.title);
    Picker::new(&title, rows, &mut tui.picker).render(frame, area);
}

fn draw_units(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let Some(level) = app.active_level() else {
        return;
    };
    let rows = level
        .units()
        .iter()
        .map(|unit| PickerRow::new(unit.title.clone(), unit.subtitle.clone()))
        .collect();
    Picker::new("Grammar Units", rows, &mut tui.picker)
        .empty_text("No grammar units yet")
        .render(frame, area);
}

fn draw_speaking(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let Some(content) = app.active_speaking() else {
        return;
    };
    match app.speaking_mode {
        SpeakingMode::Menu => {
            let rows = MISSIONS
                .iter()
                .map(|mission| match mission {
                    SpeakingMode::ReadAloud => {
                        PickerRow::new("Read Aloud", content.read_aloud.title.clone())
                    }
                    _ => PickerRow::new("Listening Game", content.listening_game.title.clone()),
                })
                .collect();
            Picker::new("Speaking Lab", rows, &mut tui.picker).render(frame, area);
        }
        SpeakingMode::ReadAloud => {
            let mut panel = ReadAloudPanel {
                content: &content.read_aloud,
                show_translation: app.read_aloud.show_translation,
                recording: app.read_aloud.recording,
            };
            panel.render(frame, area);
        }
        SpeakingMode::ListeningGame => {
            let Some(clue) = app.current_clue() else {
                return;
            };
            let mut panel = ListeningPanel::new(&content.listening_game, clue, &mut tui.picker);
            panel.clue_index = app.listening.clue_index;
            panel.guess = app.listening.guess.as_deref();
            panel.playing = app.listening.playing;
            panel.render(frame, area);
        }
    }
}

fn draw_quiz(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let Some(question) = app.current_question() else {
        debug_assert_eq!(app.quiz_status(), QuizStatus::NoQuestions);
        NoQuestionsCard.render(frame, area);
        return;
    };
    let mut card = QuizCard::new(question, &mut tui.picker);
    card.index = app.quiz.question_index;
    card.total = app.questions().len();
    card.score = app.quiz.score;
    card.selected_option = app.quiz.selected_option;
    card.explanation_shown = app.quiz.explanation_shown;
    card.is_last = app.is_last_question();
    card.render(frame, area);
}

fn draw_shop(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let rows = app
        .catalog
        .shop
        .iter()
        .map(|item| {
            let detail = if app.owns(&item.id) {
                "Owned".to_string()
            } else {
                format!("{} pts", item.price)
            };
            let affordable = shop::can_purchase(app.points, &app.owned_items, item);
            PickerRow::new(format!("{} {}", item.icon, item.name), detail).dimmed(!affordable)
        })
        .collect();
    let title = format!("Gift Shop · {} pts", app.points);
    Picker::new(&title, rows, &mut tui.picker)
        .empty_text("The shop is empty.")
        .render(frame, area);
}

fn profile_overlay(app: &App) -> ProfileOverlay {
    let user = leaderboard::current_user(&app.catalog.leaderboard);
    ProfileOverlay {
        name: user
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Student".to_string()),
        student_id: user.map(|u| u.id.clone()).unwrap_or_default(),
        points: app.points,
        owned_items: app.owned_items.len(),
        since: app.started_at.format("%b %d %H:%M").to_string(),
    }
}
