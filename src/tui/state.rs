use crate::presenter;
use crate::view::ViewState;
use unicode_width::UnicodeWidthChar;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// TUI-only state layered over the shared [`ViewState`].
#[derive(Debug, Default)]
pub struct UiState {
    pub view: ViewState,
    /// Cursor position in the company input, in chars.
    pub cursor: usize,
    pub show_help: bool,
    pub spinner_frame: usize,
}

impl UiState {
    pub fn new(company: &str) -> Self {
        Self {
            view: ViewState::new(company),
            cursor: company.chars().count(),
            ..Default::default()
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    fn input_len(&self) -> usize {
        self.view.input.chars().count()
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.view
            .input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.view.input.len())
    }

    // The input is read-only while a run is in flight.

    pub fn insert_char(&mut self, c: char) {
        if self.view.busy {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.view.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.view.busy || self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.view.input.remove(at);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.view.busy || self.cursor >= self.input_len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.view.input.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input_len();
    }

    /// Terminal column of the cursor, counting wide chars as two cells.
    pub fn cursor_column(&self) -> usize {
        self.view
            .input
            .chars()
            .take(self.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Horizontal scroll and on-screen cursor column for an input box
    /// `width` cells wide, keeping the cursor in view.
    pub fn input_viewport(&self, width: usize) -> (usize, usize) {
        let width = width.max(1);
        let column = self.cursor_column();
        let scroll = column.saturating_sub(width - 1);
        (scroll, column - scroll)
    }

    /// Report text to copy, or `None` with a status message when there are
    /// no results yet.
    pub fn report_to_copy(&mut self) -> Option<String> {
        match self.view.visible_result() {
            Some(r) => Some(presenter::text_report(r).join("\n")),
            None => {
                self.view.info = "No results to copy yet.".into();
                None
            }
        }
    }

    /// Message for the footer status line, if any.
    pub fn status_message(&self) -> Option<&str> {
        if self.view.info.is_empty() {
            None
        } else {
            Some(&self.view.info)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_cursor_and_multibyte_chars() {
        let mut s = UiState::new("Tsla");
        s.move_home();
        s.move_right();
        s.insert_char('e');
        assert_eq!(s.view.input, "Tesla");
        assert_eq!(s.cursor, 2);

        s.move_end();
        s.insert_char(' ');
        s.insert_char('é');
        s.insert_char('ü');
        assert_eq!(s.view.input, "Tesla éü");
        s.backspace();
        assert_eq!(s.view.input, "Tesla é");
        s.move_left();
        s.delete();
        assert_eq!(s.view.input, "Tesla ");
        s.delete();
        assert_eq!(s.view.input, "Tesla ");
    }

    #[test]
    fn clearing_the_input_disables_the_trigger() {
        let mut s = UiState::new("AB");
        assert!(s.view.can_trigger());
        s.backspace();
        s.backspace();
        s.backspace();
        assert_eq!(s.view.input, "");
        assert_eq!(s.cursor, 0);
        assert!(!s.view.can_trigger());
        s.insert_char(' ');
        assert!(!s.view.can_trigger());
    }

    #[test]
    fn input_is_locked_while_busy() {
        let mut s = UiState::new("Tesla");
        s.view.begin();
        s.insert_char('x');
        s.backspace();
        s.move_home();
        s.delete();
        assert_eq!(s.view.input, "Tesla");
    }

    #[test]
    fn spinner_cycles() {
        let mut s = UiState::new("Tesla");
        let first = s.spinner();
        for _ in 0..SPINNER.len() {
            s.tick();
        }
        assert_eq!(s.spinner(), first);
    }

    #[test]
    fn cursor_column_counts_wide_chars_as_two_cells() {
        let mut s = UiState::new("株式会社");
        assert_eq!(s.cursor, 4);
        assert_eq!(s.cursor_column(), 8);
        s.move_left();
        assert_eq!(s.cursor_column(), 6);

        let s = UiState::new("Tesla é");
        assert_eq!(s.cursor_column(), 7);
    }

    #[test]
    fn viewport_scrolls_by_columns() {
        let s = UiState::new("株式会社");
        // 8 columns of text in a 5-cell box: scroll 4 so the cursor sits on the last cell.
        assert_eq!(s.input_viewport(5), (4, 4));
        assert_eq!(s.input_viewport(20), (0, 8));

        let mut s = UiState::new("株式会社");
        s.move_home();
        assert_eq!(s.input_viewport(5), (0, 0));
    }

    #[test]
    fn copy_without_results_reports_status_even_while_busy() {
        let mut s = UiState::new("Tesla");
        assert_eq!(s.status_message(), None);
        s.view.begin();
        assert!(s.report_to_copy().is_none());
        assert_eq!(s.status_message(), Some("No results to copy yet."));
    }

    #[test]
    fn copy_returns_the_text_report_once_results_are_visible() {
        let mut s = UiState::new("Tesla");
        s.view.begin();
        s.view.apply_event(crate::model::WorkflowEvent::Completed {
            result: Box::new(crate::sample::sample_analysis()),
        });
        let text = s.report_to_copy().unwrap();
        assert!(text.contains("Tesla"));
    }
}
