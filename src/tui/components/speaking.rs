//! # Speaking Lab Components
//!
//! The two missions of the speaking lab. Neither awards points.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap};

use crate::core::catalog::{ListeningClue, ListeningGame, ReadAloud};
use crate::core::state::Pace;
use crate::tui::component::Component;
use crate::tui::components::PickerState;

pub struct ReadAloudPanel<'a> {
    pub content: &'a ReadAloud,
    pub show_translation: bool,
    pub recording: bool,
}

impl Component for ReadAloudPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} · {} ", self.content.title, self.content.level))
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [text_area, translation_area, controls_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(if self.show_translation { 4 } else { 0 }),
            Constraint::Length(2),
        ])
        .areas(inner);

        let passage = Paragraph::new(self.content.text.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true });
        frame.render_widget(passage, text_area);

        if self.show_translation {
            let translation = Paragraph::new(self.content.translation.as_str())
                .style(Style::default().fg(Color::Cyan))
                .block(Block::default().borders(Borders::TOP).title(" Translation "))
                .wrap(Wrap { trim: true });
            frame.render_widget(translation, translation_area);
        }

        let paces = Pace::ALL
            .iter()
            .enumerate()
            .map(|(i, pace)| format!("{} {}", i + 1, pace.label()))
            .collect::<Vec<_>>()
            .join("  ");
        let record = if self.recording {
            Span::styled(
                "● Recording...",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("r Record", Style::default().fg(Color::Gray))
        };
        let controls = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("Play: {paces}"), Style::default().fg(Color::Gray)),
                Span::raw("   "),
                record,
            ]),
            Line::from(Span::styled(
                if self.show_translation {
                    "t Hide translation"
                } else {
                    "t Show translation"
                },
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(controls, controls_area);
    }
}

pub struct ListeningPanel<'a> {
    pub game: &'a ListeningGame,
    pub clue: &'a ListeningClue,
    pub clue_index: usize,
    pub guess: Option<&'a str>,
    pub playing: bool,
    state: &'a mut PickerState,
}

impl<'a> ListeningPanel<'a> {
    pub fn new(
        game: &'a ListeningGame,
        clue: &'a ListeningClue,
        state: &'a mut PickerState,
    ) -> Self {
        Self {
            game,
            clue,
            clue_index: 0,
            guess: None,
            playing: false,
            state,
        }
    }
}

impl Component for ListeningPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(
                " {} · {}/{} ",
                self.game.title,
                self.clue_index + 1,
                self.game.clues.len()
            ))
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [intro_area, sound_area, options_area, feedback_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(self.clue.options.len() as u16),
            Constraint::Length(2),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(self.game.intro.as_str()).wrap(Wrap { trim: true }),
            intro_area,
        );

        let sound = if self.playing {
            Span::styled(
                "♪ Playing...",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("space Play the sound", Style::default().fg(Color::Gray))
        };
        frame.render_widget(Paragraph::new(Line::from(sound)), sound_area);

        let items: Vec<ListItem> = self
            .clue
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let key = option.key();
                let style = match self.guess {
                    Some(_) if key == self.clue.correct_animal => {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    }
                    Some(guess) if guess == key => {
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                    }
                    Some(_) => Style::default().fg(Color::DarkGray),
                    None if i == self.state.selected => Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                    None => Style::default().fg(Color::Gray),
                };
                let icon = option.icon().unwrap_or("?");
                ListItem::new(Line::from(Span::styled(
                    format!("{} {} {}", i + 1, icon, option.display_label()),
                    style,
                )))
            })
            .collect();
        frame.render_widget(List::new(items), options_area);

        if let Some(guess) = self.guess {
            let (text, color) = if guess == self.clue.correct_animal {
                ("Correct! Good job!", Color::Green)
            } else {
                ("Try again!", Color::Red)
            };
            let feedback = Paragraph::new(vec![
                Line::from(Span::styled(
                    text,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Press Enter to continue",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(feedback, feedback_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(component: &mut impl Component, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                component.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_read_aloud_controls() {
        let catalog = Catalog::builtin().unwrap();
        let speaking = catalog.level(0, 1).and_then(|l| l.speaking()).unwrap();
        let mut panel = ReadAloudPanel {
            content: &speaking.read_aloud,
            show_translation: false,
            recording: true,
        };
        let text = draw(&mut panel, 70, 16);
        assert!(text.contains("Outdoor Sentence"));
        assert!(text.contains("Small minds"));
        assert!(text.contains("1 Slow  2 Normal  3 Fast"));
        assert!(text.contains("Recording..."));
        assert!(text.contains("t Show translation"));
    }

    #[test]
    fn test_listening_feedback_after_guess() {
        let catalog = Catalog::builtin().unwrap();
        let speaking = catalog.level(0, 1).and_then(|l| l.speaking()).unwrap();
        let game = &speaking.listening_game;
        let mut state = PickerState::default();
        state.reset(3);
        let mut panel = ListeningPanel::new(game, &game.clues[0], &mut state);
        panel.guess = Some("bird");
        let text = draw(&mut panel, 60, 16);
        assert!(text.contains("1/3"));
        assert!(text.contains("Bird"));
        assert!(text.contains("Correct! Good job!"));
    }

    #[test]
    fn test_listening_prompts_before_guess() {
        let catalog = Catalog::builtin().unwrap();
        let speaking = catalog.level(0, 1).and_then(|l| l.speaking()).unwrap();
        let game = &speaking.listening_game;
        let mut state = PickerState::default();
        state.reset(3);
        let mut panel = ListeningPanel::new(game, &game.clues[1], &mut state);
        panel.clue_index = 1;
        panel.playing = true;
        let text = draw(&mut panel, 60, 16);
        assert!(text.contains("2/3"));
        assert!(text.contains("Playing..."));
        assert!(!text.contains("Try again!"));
    }
}
