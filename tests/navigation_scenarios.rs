use std::sync::Arc;

use eduquest::core::action::{Action, COMING_SOON, Effect, update};
use eduquest::core::catalog::{Catalog, ModuleId};
use eduquest::core::state::{App, QuizStatus, View};

// ============================================================================
// Helper Functions
// ============================================================================

const ENGLISH: usize = 0;
const MATH: usize = 2;
const LEVEL_A: usize = 0;
const LEVEL_P: usize = 1;

fn app_with_points(points: u32) -> App {
    let catalog = Catalog::builtin().expect("built-in catalog");
    App::new(Arc::new(catalog), points)
}

/// Apply actions in order, returning the effect of the last one.
fn run(app: &mut App, actions: impl IntoIterator<Item = Action>) -> Effect {
    actions
        .into_iter()
        .fold(Effect::None, |_, action| update(app, action))
}

/// Answer every question of the running quiz with the given indices.
fn answer_all(app: &mut App, answers: &[usize]) {
    for &answer in answers {
        update(app, Action::Answer(answer));
        update(app, Action::Advance);
    }
}

fn open_grammar_unit(app: &mut App, unit: usize) {
    run(
        app,
        [
            Action::SelectSubject(ENGLISH),
            Action::SelectLevel(LEVEL_P),
            Action::SelectModule(ModuleId::Grammar),
            Action::SelectUnit(unit),
        ],
    );
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_direct_subject_perfect_run() {
    let mut app = app_with_points(2500);

    update(&mut app, Action::SelectSubject(MATH));
    assert_eq!(app.view, View::Quiz);
    assert_eq!(app.total_questions(), 1);

    update(&mut app, Action::Answer(1));
    assert_eq!(app.quiz.score, 1);
    update(&mut app, Action::Advance);
    assert_eq!(app.view, View::Result);

    let reward = app.pending_reward();
    assert_eq!(reward.percentage, 100);
    assert_eq!(reward.total, 60);

    update(&mut app, Action::CollectReward);
    assert_eq!(app.points, 2560);
    assert_eq!(app.view, View::Home);
}

#[test]
fn test_grammar_unit_perfect_run() {
    let mut app = app_with_points(2500);
    open_grammar_unit(&mut app, 0);
    assert_eq!(app.view, View::Quiz);
    assert_eq!(app.active_unit().map(|u| u.id.as_str()), Some("unit_8"));
    assert_eq!(app.total_questions(), 4);

    answer_all(&mut app, &[0, 0, 0, 1]);
    assert_eq!(app.view, View::Result);
    assert_eq!(app.quiz.score, 4);
    assert_eq!(app.pending_reward().total, 90);

    update(&mut app, Action::CollectReward);
    assert_eq!(app.points, 2590);
    // Back to the unit list the run was launched from
    assert_eq!(app.view, View::GrammarUnits);
}

#[test]
fn test_unavailable_speaking_module_sets_notice() {
    let mut app = app_with_points(2500);
    run(
        &mut app,
        [Action::SelectSubject(ENGLISH), Action::SelectLevel(LEVEL_A)],
    );
    let before = app.view;

    update(&mut app, Action::SelectModule(ModuleId::Speaking));
    assert_eq!(app.view, before);
    assert_eq!(app.notice.as_deref(), Some(COMING_SOON));
    assert_eq!(app.selection.module, None);

    // Timer completions leave it up; the next user action clears it
    update(&mut app, Action::PlaybackFinished);
    assert_eq!(app.notice.as_deref(), Some(COMING_SOON));
    update(&mut app, Action::DismissNotice);
    assert_eq!(app.notice, None);
}

#[test]
fn test_purchase_rejected_when_short() {
    let mut app = app_with_points(500);
    update(&mut app, Action::OpenShop);

    update(&mut app, Action::Purchase("gif_2".to_string()));
    assert_eq!(app.points, 500);
    assert!(app.owned_items.is_empty());
    assert!(app.status_message.contains("Need 100 more points"));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_score_never_exceeds_answered_questions() {
    for answers in [[0, 0, 0, 1], [1, 1, 1, 1], [0, 1, 2, 0], [2, 2, 2, 2]] {
        let mut app = app_with_points(0);
        open_grammar_unit(&mut app, 0);
        for (answered, &answer) in answers.iter().enumerate() {
            update(&mut app, Action::Answer(answer));
            assert!(app.quiz.score as usize <= answered + 1);
            update(&mut app, Action::Advance);
        }
        assert!(app.quiz.score <= app.total_questions());
        let reward = app.pending_reward();
        assert!(reward.percentage <= 100);
    }
}

#[test]
fn test_points_only_grow_through_rewards() {
    let mut app = app_with_points(0);
    let mut last = app.points;
    for unit in 0..4 {
        open_grammar_unit(&mut app, unit);
        let total = app.total_questions() as usize;
        answer_all(&mut app, &vec![0; total]);
        update(&mut app, Action::CollectReward);
        assert!(app.points >= last);
        last = app.points;
        update(&mut app, Action::GoHome);
    }
}

#[test]
fn test_double_answer_scores_once() {
    let mut app = app_with_points(0);
    update(&mut app, Action::SelectSubject(MATH));

    update(&mut app, Action::Answer(1));
    update(&mut app, Action::Answer(1));
    assert_eq!(app.quiz.score, 1);
    update(&mut app, Action::Answer(0));
    assert_eq!(app.quiz.selected_option, Some(1));
}

#[test]
fn test_advance_requires_explanation() {
    let mut app = app_with_points(0);
    open_grammar_unit(&mut app, 0);

    update(&mut app, Action::Advance);
    assert_eq!(app.quiz.question_index, 0);
    assert_eq!(app.quiz_status(), QuizStatus::Asking);

    update(&mut app, Action::Answer(0));
    update(&mut app, Action::Advance);
    assert_eq!(app.quiz.question_index, 1);
}

#[test]
fn test_purchase_sequences_keep_balance_consistent() {
    let ids = ["stick_1", "gif_2", "stick_1", "gif_1", "nope", "stick_2", "gif_2"];
    for start in [0, 150, 600, 2500] {
        let mut app = app_with_points(start);
        update(&mut app, Action::OpenShop);
        let mut spent = 0;
        for id in ids {
            let before = app.points;
            update(&mut app, Action::Purchase(id.to_string()));
            spent += before - app.points;
        }
        assert_eq!(app.points + spent, start);
        let mut unique = app.owned_items.iter().collect::<Vec<_>>();
        unique.dedup();
        assert_eq!(unique.len(), app.owned_items.len());
    }
}

#[test]
fn test_empty_question_set_reports_no_questions() {
    let catalog = Catalog::from_toml_str(
        r#"
        [[subjects]]
        id = "empty"
        title = "Empty"

        [subjects.content]
        type = "direct"
        "#,
    )
    .expect("catalog");
    let mut app = App::new(Arc::new(catalog), 0);

    update(&mut app, Action::SelectSubject(0));
    assert_eq!(app.view, View::Quiz);
    assert_eq!(app.quiz_status(), QuizStatus::NoQuestions);
    assert!(app.current_question().is_none());

    // Nothing to answer or advance
    update(&mut app, Action::Answer(0));
    update(&mut app, Action::Advance);
    assert_eq!(app.view, View::Quiz);

    update(&mut app, Action::QuitQuiz);
    assert_eq!(app.view, View::Home);
}

#[test]
fn test_unauthored_phonics_gets_placeholder() {
    let mut app = app_with_points(0);
    run(
        &mut app,
        [
            Action::SelectSubject(ENGLISH),
            Action::SelectLevel(LEVEL_A),
            Action::SelectModule(ModuleId::Phonics),
        ],
    );
    assert_eq!(app.view, View::Quiz);
    assert_eq!(app.total_questions(), 1);

    update(&mut app, Action::Answer(0));
    update(&mut app, Action::Advance);
    update(&mut app, Action::CollectReward);
    assert_eq!(app.points, 60);
    assert_eq!(app.view, View::EnglishMenu);
}

#[test]
fn test_exit_from_anywhere() {
    let mut app = app_with_points(0);
    open_grammar_unit(&mut app, 1);
    assert_eq!(update(&mut app, Action::Exit), Effect::Exit);
}
