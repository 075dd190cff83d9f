//! # TUI Components
//!
//! Every screen is assembled from the components in this directory.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: top line with breadcrumb, points and status
//! - `QuizCard` / `ResultCard`: the quiz run
//! - `LeaderboardTable`: roster with live points
//! - `ReadAloudPanel`: the read-aloud mission
//! - `MenuOverlay` / `ProfileOverlay` / `NoticeBanner`: overlays
//!
//! ## Stateful Components (Persistent State + Transient Wrapper)
//!
//! - `Picker` borrows a `PickerState` owned by `TuiState`
//! - `ListeningPanel` and `QuizCard` borrow the same state for their options
//!
//! Components never read `App` directly. `ui.rs` builds their props, which
//! keeps every component testable against a `TestBackend` in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file, shared layout helpers)
//! ├── title_bar.rs     (top status line)
//! ├── picker.rs        (list screens)
//! ├── quiz.rs          (question, explanation, result)
//! ├── leaderboard.rs   (roster table)
//! ├── speaking.rs      (read-aloud and listening missions)
//! └── overlay.rs       (menu, profile, notice)
//! ```

pub mod leaderboard;
pub mod overlay;
pub mod picker;
pub mod quiz;
pub mod speaking;
pub mod title_bar;

pub use leaderboard::LeaderboardTable;
pub use overlay::{MenuEntry, MenuOverlay, NoticeBanner, ProfileOverlay};
pub use picker::{Picker, PickerRow, PickerState};
pub use quiz::{NoQuestionsCard, QuizCard, ResultCard};
pub use speaking::{ListeningPanel, ReadAloudPanel};
pub use title_bar::TitleBar;

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to fit within `max_width` terminal columns, adding "..." if needed.
///
/// Measures display width, so CJK titles and emoji icons are cut correctly.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// A centered rect of fixed size, clamped to the outer rect.
pub fn centered_fixed(width: u16, height: u16, outer: Rect) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_str("Shop", 10), "Shop");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_str("Possessive Nouns", 10), "Possess...");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char is two columns wide
        let out = truncate_str("英語冒險島", 7);
        assert_eq!(out, "英語...");
        assert!(out.width() <= 7);
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_str("Leaderboard", 2), "..");
        assert_eq!(truncate_str("Leaderboard", 0), "");
    }

    #[test]
    fn test_centered_fixed_clamps() {
        let outer = Rect::new(0, 0, 20, 10);
        let rect = centered_fixed(40, 4, outer);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.y, 3);
    }
}
