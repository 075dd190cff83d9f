//! # TitleBar Component
//!
//! Single-line status bar at the top of every screen.
//!
//! Shows where the user is, their spendable points, and the latest status
//! message. When the terminal is too narrow the status message is cut first,
//! then the location, so the points are always visible:
//!
//! 1. `"EduQuest · Daily Words › Grammar | ★ 2500 pts | Recording saved"`
//! 2. `"EduQuest · Daily Words › Grammar | ★ 2500 pts"` (no status)

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::components::truncate_str;

pub struct TitleBar {
    /// Breadcrumb or view title.
    pub location: String,
    pub points: u32,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(location: String, points: u32, status_message: String) -> Self {
        Self {
            location,
            points,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;
        let brand = "EduQuest · ";
        let points = format!(" | ★ {} pts", self.points);

        let location_budget = width.saturating_sub(brand.width() + points.width());
        let location = truncate_str(&self.location, location_budget);
        let used = brand.width() + location.width() + points.width();

        let mut spans = vec![
            Span::styled(
                brand,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(location),
            Span::styled(points, Style::default().fg(Color::Yellow)),
        ];

        if !self.status_message.is_empty() && width > used + 3 {
            let status = truncate_str(&self.status_message, width - used - 3);
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(status, Style::default().fg(Color::Cyan)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
