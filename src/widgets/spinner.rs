//! Loading indicator

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render ticks each spinner frame stays on screen
const TICKS_PER_FRAME: u64 = 2;

pub fn spinner_frame(frame_count: u64) -> &'static str {
    let index = (frame_count / TICKS_PER_FRAME) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[index]
}

/// Spinner followed by an italic label
pub fn spinner_line(frame_count: u64, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{} ", spinner_frame(frame_count)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            label.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}
