use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that draws itself.
///
/// Components take their data as struct fields ("props") built fresh each
/// frame from `App` and `TuiState`. Stateful ones borrow their persistent
/// state mutably, the same way ratatui's `StatefulWidget` does, so that
/// list offsets survive between frames.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
