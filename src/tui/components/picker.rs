//! # Picker Component
//!
//! A titled, bordered list with a movable highlight. Every drill-down
//! screen (subjects, levels, modules, units, missions, shop) is a picker.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState` lives in `TuiState` and is reset when the screen changes
//! - `Picker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::truncate_str;
use crate::tui::event::TuiEvent;

/// Persistent cursor for whichever list the current screen shows.
#[derive(Debug, Default)]
pub struct PickerState {
    pub selected: usize,
    pub list_state: ListState,
    len: usize,
}

impl PickerState {
    /// Point at the first of `len` rows.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = 0;
        self.list_state = ListState::default();
        if len > 0 {
            self.list_state.select(Some(0));
        }
    }

    /// Keep the cursor in range when the row count changes in place.
    pub fn set_len(&mut self, len: usize) {
        if len == self.len {
            return;
        }
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Jump straight to a row, e.g. from a number key.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.selected = index;
        self.list_state.select(Some(index));
        true
    }
}

impl EventHandler for PickerState {
    /// Index of the activated row.
    type Event = usize;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<usize> {
        match event {
            TuiEvent::CursorUp => {
                if self.len > 0 {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if self.len > 0 {
                    self.selected = (self.selected + 1).min(self.len - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit if self.len > 0 => Some(self.selected),
            _ => None,
        }
    }
}

/// One row of a picker.
#[derive(Debug, Clone, Default)]
pub struct PickerRow {
    pub label: String,
    /// Right-aligned secondary text.
    pub detail: String,
    /// Shown greyed out (e.g. unaffordable shop items).
    pub dimmed: bool,
}

impl PickerRow {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
            dimmed: false,
        }
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }
}

/// Transient render wrapper for a picker screen.
pub struct Picker<'a> {
    pub title: &'a str,
    pub rows: Vec<PickerRow>,
    pub empty_text: &'a str,
    state: &'a mut PickerState,
}

impl<'a> Picker<'a> {
    pub fn new(title: &'a str, rows: Vec<PickerRow>, state: &'a mut PickerState) -> Self {
        Self {
            title,
            rows,
            empty_text: "Nothing here yet.",
            state,
        }
    }

    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }
}

impl Component for Picker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));

        if self.rows.is_empty() {
            let empty = Paragraph::new(self.empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // borders + padding
        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let marker = if i == self.state.selected { "▸ " } else { "  " };
                let detail = truncate_str(&row.detail, inner_width / 2);
                let label_width = inner_width
                    .saturating_sub(marker.width() + detail.width() + 1);
                let label = truncate_str(&row.label, label_width);
                let gap = label_width.saturating_sub(label.width()) + 1;

                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if row.dimmed {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Gray)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(label, style),
                    Span::styled(" ".repeat(gap), style),
                    Span::styled(detail, style.add_modifier(Modifier::DIM)),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
