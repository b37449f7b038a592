use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::App;

/// Lines scrolled per PageUp/PageDown
const PAGE_SCROLL: i32 = 10;

impl App {
    /// Wait up to `timeout` for a terminal event and handle it
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        match event::read()? {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            Event::Paste(text) => self.handle_paste_event(text),
            _ => {}
        }
        Ok(())
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.handle_global_keys(key) {
            return;
        }

        // Controls are disabled while a request is running
        if self.is_busy() {
            return;
        }

        if self.handle_action_keys(key) {
            return;
        }

        self.input.textarea.input(key);
    }

    /// Handle keys that work even while busy
    /// Returns true if key was handled, false otherwise
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                true
            }
            KeyCode::PageDown => {
                self.scroll_recipe(PAGE_SCROLL);
                true
            }
            KeyCode::PageUp => {
                self.scroll_recipe(-PAGE_SCROLL);
                true
            }
            _ => false,
        }
    }

    /// Handle workflow triggers and suggestion chips
    fn handle_action_keys(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.input.textarea.insert_newline();
                true
            }
            KeyCode::Enter => {
                self.start_recipe();
                true
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.start_suggestions();
                true
            }
            // Alt+1..9 accepts a suggestion chip
            KeyCode::Char(c @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
                let index = c as usize - '1' as usize;
                self.accept_suggestion(index);
                true
            }
            _ => false,
        }
    }

    /// Insert pasted text at the cursor
    pub fn handle_paste_event(&mut self, text: String) {
        if self.is_busy() {
            return;
        }
        self.input.textarea.insert_str(text);
    }
}
