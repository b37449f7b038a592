use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Red bordered banner carrying an error message
pub fn error_banner(message: &str) -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled(
            "⚠ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message.to_string(), Style::default().fg(Color::Red)),
    ]);

    Paragraph::new(line).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .border_style(Style::default().fg(Color::Red)),
    )
}
