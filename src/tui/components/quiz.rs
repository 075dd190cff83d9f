//! # Quiz Components
//!
//! `QuizCard` draws the current question with lettered options. Once the
//! user answers, options are marked right/wrong and the explanation panel
//! appears below. `ResultCard` shows the finished run and what collecting
//! it will pay.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap};

use crate::core::catalog::{Question, QuestionKind};
use crate::core::scoring::Reward;
use crate::tui::component::Component;
use crate::tui::components::PickerState;

/// Letter shown in front of option `index`.
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

pub struct QuizCard<'a> {
    pub question: &'a Question,
    /// Zero-based position in the run.
    pub index: usize,
    pub total: usize,
    pub score: u32,
    pub selected_option: Option<usize>,
    pub explanation_shown: bool,
    pub is_last: bool,
    state: &'a mut PickerState,
}

impl<'a> QuizCard<'a> {
    pub fn new(question: &'a Question, state: &'a mut PickerState) -> Self {
        Self {
            question,
            index: 0,
            total: 1,
            score: 0,
            selected_option: None,
            explanation_shown: false,
            is_last: true,
            state,
        }
    }

    fn option_style(&self, i: usize) -> (Style, &'static str) {
        if self.explanation_shown {
            if self.question.is_correct(i) {
                return (Style::default().fg(Color::Green).add_modifier(Modifier::BOLD), "✓");
            }
            if self.selected_option == Some(i) {
                return (Style::default().fg(Color::Red).add_modifier(Modifier::BOLD), "✗");
            }
            return (Style::default().fg(Color::DarkGray), " ");
        }
        if i == self.state.selected {
            (
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                "▸",
            )
        } else {
            (Style::default().fg(Color::Gray), " ")
        }
    }
}

impl Component for QuizCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(
                " Question {}/{} · Score {} ",
                self.index + 1,
                self.total,
                self.score
            ))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut prompt_lines = vec![Line::from(Span::styled(
            self.question.prompt.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if self.question.kind == QuestionKind::VisualAudio
            && let Some(visual) = &self.question.visual
        {
            prompt_lines.push(Line::from(Span::styled(
                format!("[picture: {visual}]"),
                Style::default().fg(Color::Magenta),
            )));
        }
        let prompt = Paragraph::new(prompt_lines).wrap(Wrap { trim: false });
        let prompt_height = (prompt.line_count(inner.width) as u16).max(1);

        let explanation_height = if self.explanation_shown { 5 } else { 0 };
        let [prompt_area, _, options_area, explanation_area] = Layout::vertical([
            Constraint::Length(prompt_height),
            Constraint::Length(1),
            Constraint::Min(self.question.options.len().min(4) as u16),
            Constraint::Length(explanation_height),
        ])
        .areas(inner);

        frame.render_widget(prompt, prompt_area);

        let items: Vec<ListItem> = self
            .question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let (style, mark) = self.option_style(i);
                let icon = option.icon().map(|icon| format!("{icon} ")).unwrap_or_default();
                ListItem::new(Line::from(Span::styled(
                    format!("{mark} {}. {icon}{}", option_letter(i), option.display_label()),
                    style,
                )))
            })
            .collect();
        frame.render_widget(List::new(items), options_area);

        if self.explanation_shown {
            let correct = self
                .selected_option
                .is_some_and(|i| self.question.is_correct(i));
            let (verdict, color) = if correct {
                ("Correct!", Color::Green)
            } else {
                ("Not quite.", Color::Red)
            };
            let next = if self.is_last {
                "Press Enter to see your results"
            } else {
                "Press Enter for the next question"
            };
            let explanation = Paragraph::new(vec![
                Line::from(Span::styled(
                    verdict,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(self.question.explanation.clone()),
                Line::from(Span::styled(next, Style::default().fg(Color::DarkGray))),
            ])
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .wrap(Wrap { trim: true });
            frame.render_widget(explanation, explanation_area);
        }
    }
}

pub struct ResultCard {
    pub score: u32,
    pub total: u32,
    pub reward: Reward,
}

impl Component for ResultCard {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Quiz Complete!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "{}/{} correct ({}%)",
                self.score, self.total, self.reward.percentage
            )),
            Line::from(format!("+{} points", self.reward.base)),
        ];
        if self.reward.is_perfect() {
            lines.push(Line::from(Span::styled(
                format!("Perfect run bonus +{}", self.reward.bonus),
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Press Enter to collect {} points", self.reward.total),
            Style::default().fg(Color::DarkGray),
        )));

        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Results "),
            );
        frame.render_widget(card, area);
    }
}

/// Shown when a run has no questions at all.
pub struct NoQuestionsCard;

impl Component for NoQuestionsCard {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let card = Paragraph::new(vec![
            Line::from("No questions"),
            Line::from(Span::styled(
                "Press Enter to return home",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Quiz "));
        frame.render_widget(card, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{ModuleId, QuestionOption};
    use crate::core::scoring::reward;
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

    fn question() -> Question {
        Question {
            id: "m1".to_string(),
            prompt: "What is 5 + 7?".to_string(),
            options: ["10", "12", "13", "11"]
                .into_iter()
                .map(|s| QuestionOption::Label(s.to_string()))
                .collect(),
            correct_answer: 1,
            explanation: "5 plus 7 equals 12.".to_string(),
            ..Question::placeholder(ModuleId::Vocab)
        }
    }

    #[test]
    fn test_option_letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
    }

    #[test]
    fn test_asking_shows_prompt_and_options() {
        let q = question();
        let mut state = PickerState::default();
        state.reset(4);
        let mut card = QuizCard::new(&q, &mut state);
        let text = draw(&mut card, 60, 16);
        assert!(text.contains("Question 1/1"));
        assert!(text.contains("What is 5 + 7?"));
        assert!(text.contains("▸ A. 10"));
        assert!(text.contains("D. 11"));
        assert!(!text.contains("Correct!"));
    }

    #[test]
    fn test_explaining_marks_answers() {
        let q = question();
        let mut state = PickerState::default();
        state.reset(4);
        let mut card = QuizCard::new(&q, &mut state);
        card.selected_option = Some(0);
        card.explanation_shown = true;
        let text = draw(&mut card, 60, 16);
        assert!(text.contains("✗ A. 10"));
        assert!(text.contains("✓ B. 12"));
        assert!(text.contains("Not quite."));
        assert!(text.contains("5 plus 7 equals 12."));
        assert!(text.contains("see your results"));
    }

    #[test]
    fn test_result_card_perfect() {
        let mut card = ResultCard {
            score: 1,
            total: 1,
            reward: reward(1, 1),
        };
        let text = draw(&mut card, 50, 10);
        assert!(text.contains("1/1 correct (100%)"));
        assert!(text.contains("Perfect run bonus +50"));
        assert!(text.contains("collect 60 points"));
    }

    #[test]
    fn test_result_card_partial() {
        let mut card = ResultCard {
            score: 3,
            total: 4,
            reward: reward(3, 4),
        };
        let text = draw(&mut card, 50, 10);
        assert!(text.contains("3/4 correct (75%)"));
        assert!(!text.contains("bonus"));
    }

    #[test]
    fn test_no_questions_card() {
        let text = draw(&mut NoQuestionsCard, 40, 5);
        assert!(text.contains("No questions"));
    }
}
