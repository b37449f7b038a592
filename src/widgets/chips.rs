//! Suggestion chips
//!
//! Each suggestion is drawn as `Alt+n + name`, wrapped onto as many lines as
//! the width requires. Only the first nine chips get a shortcut.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

/// Suggestions with a keyboard shortcut
pub const MAX_SHORTCUTS: usize = 9;

const CHIP_GAP: &str = "  ";

fn chip_spans(index: usize, suggestion: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if index < MAX_SHORTCUTS {
        spans.push(Span::styled(
            format!("Alt+{} ", index + 1),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        format!(" + {} ", suggestion),
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
    ));
    spans
}

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Lay the chips out left to right, wrapping at `max_width`
///
/// A chip wider than the whole line still gets a line of its own.
pub fn chip_lines(suggestions: &[String], max_width: u16) -> Vec<Line<'static>> {
    let max_width = max_width as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for (index, suggestion) in suggestions.iter().enumerate() {
        let chip = chip_spans(index, suggestion);
        let chip_width = spans_width(&chip);
        let gap = if current.is_empty() { 0 } else { CHIP_GAP.len() };

        if !current.is_empty() && current_width + gap + chip_width > max_width {
            lines.push(Line::from(std::mem::take(&mut current)));
            current_width = 0;
        } else if gap > 0 {
            current.push(Span::raw(CHIP_GAP));
            current_width += gap;
        }

        current_width += chip_width;
        current.extend(chip);
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}
