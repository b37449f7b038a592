use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::state::App;
use super::workflow::{RecipePhase, SuggestionPhase};
use crate::widgets::chips::chip_lines;
use crate::widgets::error_banner::error_banner;
use crate::widgets::recipe_panel::render_recipe_panel;
use crate::widgets::spinner::spinner_line;

pub const TITLE: &str = " Recipe Generator ";
pub const TAGLINE: &str = "Got ingredients? Let's turn them into a delicious meal!";
pub const EMPTY_RESULT_MESSAGE: &str = "Your recipe will appear here.";
/// Action hint label while that action runs
pub const LOADING_LABEL: &str = "Thinking...";
/// Results area spinner label while a recipe is generated
pub const GENERATING_LABEL: &str = "Generating your masterpiece...";

const INPUT_HEIGHT: u16 = 6;
const BANNER_HEIGHT: u16 = 3;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        self.frame_count = self.frame_count.wrapping_add(1);

        let area = frame.area();
        let chips = match &self.suggestions {
            SuggestionPhase::Ready(list) if !list.is_empty() => chip_lines(list, area.width),
            _ => Vec::new(),
        };
        let suggestions_height = match &self.suggestions {
            SuggestionPhase::Failed(_) => BANNER_HEIGHT,
            _ if chips.is_empty() => 0,
            _ => chips.len() as u16 + 1,
        };

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(suggestions_height),
            Constraint::Min(3),
        ])
        .split(area);

        render_header(frame, layout[0]);

        self.input.set_enabled(!self.is_busy());
        frame.render_widget(&self.input.textarea, layout[1]);

        self.render_action_hints(frame, layout[2]);
        self.render_suggestions(frame, layout[3], chips);
        self.render_results(frame, layout[4]);
    }

    fn render_action_hints(&self, frame: &mut Frame, area: Rect) {
        let busy = self.is_busy();
        let key_style = if busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        let label_style = Style::default().fg(Color::Gray);
        let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));

        let recipe_label = if self.recipe.is_busy() {
            LOADING_LABEL
        } else {
            "Generate Recipe"
        };
        let suggest_label = if self.suggestions.is_loading() {
            LOADING_LABEL
        } else {
            "Suggest Ingredients"
        };

        let line = Line::from(vec![
            Span::styled(" Enter ", key_style),
            Span::styled(recipe_label, label_style),
            separator.clone(),
            Span::styled("Ctrl+S ", key_style),
            Span::styled(suggest_label, label_style),
            separator.clone(),
            Span::styled("Alt+Enter ", key_style),
            Span::styled("New line", label_style),
            separator,
            Span::styled("Esc ", Style::default().fg(Color::Cyan)),
            Span::styled("Quit", label_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_suggestions(&self, frame: &mut Frame, area: Rect, chips: Vec<Line<'static>>) {
        if area.height == 0 {
            return;
        }

        if let Some(message) = self.suggestions.error() {
            frame.render_widget(error_banner(message), area);
            return;
        }

        let mut lines = vec![Line::from(Span::styled(
            " Suggestions:",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))];
        lines.extend(chips);
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        match &self.recipe {
            RecipePhase::Idle => {
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    EMPTY_RESULT_MESSAGE,
                    Style::default().fg(Color::DarkGray),
                )))
                .alignment(Alignment::Center)
                .block(results_block());
                frame.render_widget(paragraph, area);
            }
            RecipePhase::Loading { .. } => {
                let paragraph = Paragraph::new(spinner_line(self.frame_count, GENERATING_LABEL))
                    .alignment(Alignment::Center)
                    .block(results_block());
                frame.render_widget(paragraph, area);
            }
            RecipePhase::Failed(message) => {
                let banner_area = Rect {
                    height: area.height.min(BANNER_HEIGHT + 2),
                    ..area
                };
                frame.render_widget(error_banner(message), banner_area);
            }
            RecipePhase::Ready { recipe, image, .. } => {
                let scroll = render_recipe_panel(
                    frame,
                    area,
                    recipe,
                    Some(image),
                    self.recipe_scroll,
                    self.frame_count,
                );
                self.recipe_scroll = scroll;
            }
        }
    }
}

fn results_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_header(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(TAGLINE, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
