use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::{CursorMove, TextArea};

const INPUT_TITLE: &str = " Your Available Ingredients ";
const PLACEHOLDER: &str = "e.g., chicken breast, broccoli, garlic, olive oil, lemon";

/// Ingredient text area
pub struct InputState {
    pub textarea: TextArea<'static>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            textarea: new_textarea(vec![String::new()]),
        }
    }

    /// Full input text, lines joined with `\n`
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Replace the input text, leaving the cursor at the end
    pub fn set_text(&mut self, text: &str) {
        let lines = text.split('\n').map(str::to_string).collect();
        self.textarea = new_textarea(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
    }

    /// Dim the border while a request is running
    pub fn set_enabled(&mut self, enabled: bool) {
        let color = if enabled { Color::Cyan } else { Color::DarkGray };
        self.textarea.set_block(input_block(color));
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

fn input_block(border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(INPUT_TITLE)
        .border_style(Style::default().fg(border))
}

fn new_textarea(lines: Vec<String>) -> TextArea<'static> {
    let mut textarea = TextArea::new(lines);
    textarea.set_block(input_block(Color::Cyan));
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text(PLACEHOLDER);
    textarea
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_input_is_empty() {
        let input = InputState::new();
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_set_text_round_trips() {
        let mut input = InputState::new();
        input.set_text("eggs, milk\nflour");
        assert_eq!(input.text(), "eggs, milk\nflour");
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut input = InputState::new();
        input.set_text("eggs\nflour");
        assert_eq!(input.textarea.cursor(), (1, 5));

        input.textarea.insert_str(", sugar");
        assert_eq!(input.text(), "eggs\nflour, sugar");
    }
}
