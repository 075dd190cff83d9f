//! # Leaderboard Component
//!
//! Roster table in stored order. The current user's row is highlighted
//! and carries their live points.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Padding, Row, Table};

use crate::core::leaderboard::Standing;
use crate::tui::component::Component;

pub struct LeaderboardTable<'a> {
    pub standings: Vec<Standing<'a>>,
}

fn medal(rank: u32) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "  ",
    }
}

impl Component for LeaderboardTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = self.standings.iter().map(|standing| {
            let style = if standing.is_current_user {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let name = if standing.is_current_user {
                format!("{} (you)", standing.name)
            } else {
                standing.name.to_string()
            };
            Row::new(vec![
                format!("{} #{}", medal(standing.rank), standing.rank),
                name,
                standing.student_id.to_string(),
                format!("{} pts", standing.points),
            ])
            .style(style)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(7),
                Constraint::Min(12),
                Constraint::Length(8),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec!["Rank", "Name", "ID", "Points"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Leaderboard ")
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(table, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::leaderboard::standings;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_renders_roster_with_live_points() {
        let catalog = Catalog::builtin().unwrap();
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut table = LeaderboardTable {
            standings: standings(&catalog.leaderboard, 3140),
        };

        terminal
            .draw(|f| {
                let area = f.area();
                table.render(f, area);
            })
            .unwrap();

        let rows: Vec<String> = terminal
            .backend()
            .buffer()
            .content()
            .chunks(60)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect();
        let text = rows.concat();
        assert!(text.contains("Leaderboard"));
        assert!(text.contains("S-555"));

        // The user's row shows the live balance, never the stored one
        let user_row = rows
            .iter()
            .find(|row| row.contains("Alex Chen (you)"))
            .unwrap();
        assert!(user_row.contains("3140 pts"));
        assert!(!user_row.contains("2500"));
    }
}
