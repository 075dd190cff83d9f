//! # Overlays
//!
//! Drawn over whatever screen is showing, after clearing the area beneath.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph};

use crate::tui::component::Component;
use crate::tui::components::{centered_fixed, truncate_str};

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Leaderboard,
    Shop,
    Profile,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 3] = [MenuEntry::Leaderboard, MenuEntry::Shop, MenuEntry::Profile];

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Leaderboard => "Leaderboard",
            MenuEntry::Shop => "Gift Shop",
            MenuEntry::Profile => "Profile",
        }
    }
}

pub struct MenuOverlay {
    pub selected: usize,
}

impl Component for MenuOverlay {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_fixed(30, MenuEntry::ALL.len() as u16 + 4, area);
        frame.render_widget(Clear, overlay);

        let items: Vec<ListItem> = MenuEntry::ALL
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(Span::styled(entry.label(), style)))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Menu ")
                .title_bottom(Line::from(" Enter Open  Esc Close ").centered())
                .padding(Padding::uniform(1)),
        );
        frame.render_widget(list, overlay);
    }
}

pub struct ProfileOverlay {
    pub name: String,
    pub student_id: String,
    pub points: u32,
    pub owned_items: usize,
    /// Pre-formatted session start time.
    pub since: String,
}

impl Component for ProfileOverlay {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_fixed(40, 9, area);
        frame.render_widget(Clear, overlay);

        let label = Style::default().fg(Color::DarkGray);
        let width = overlay.width.saturating_sub(4) as usize;
        let lines = vec![
            Line::from(Span::styled(
                truncate_str(&self.name, width),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("ID      ", label),
                Span::raw(self.student_id.clone()),
            ]),
            Line::from(vec![
                Span::styled("Points  ", label),
                Span::raw(self.points.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Items   ", label),
                Span::raw(self.owned_items.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Since   ", label),
                Span::raw(self.since.clone()),
            ]),
        ];

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Profile ")
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(card, overlay);
    }
}

/// One-line banner for transient notices like "Coming soon!".
pub struct NoticeBanner<'a> {
    pub text: &'a str,
}

impl Component for NoticeBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let banner = centered_fixed(area.width.min(40), 3, area);
        frame.render_widget(Clear, banner);
        let paragraph = Paragraph::new(self.text)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, banner);
    }
}
