//! Recipe panel
//!
//! Renders every recipe field plus an image region with three states:
//! a placeholder while the image is generated, a summary once it exists,
//! and nothing when generation failed.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::spinner::spinner_line;
use crate::app::ImagePhase;
use crate::recipe::{Recipe, RecipeImage};

pub const IMAGE_PLACEHOLDER: &str = "Creating a delicious visual...";

fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

/// Human-readable byte count
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let size = bytes as f64;
    if size >= MB {
        format!("{:.1} MB", size / MB)
    } else if size >= KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn image_summary(image: &RecipeImage) -> Line<'static> {
    Line::from(vec![
        Span::styled("🖼  ", Style::default().fg(Color::Green)),
        Span::styled(
            format!(
                "Image ready ({}, {})",
                image.mime_type,
                format_size(image.decoded_len())
            ),
            Style::default().fg(Color::Green),
        ),
    ])
}

fn image_lines(image: Option<&ImagePhase>, frame_count: u64) -> Vec<Line<'static>> {
    match image {
        Some(ImagePhase::Loading) => vec![spinner_line(frame_count, IMAGE_PLACEHOLDER)],
        Some(ImagePhase::Ready { image, saved_to }) => {
            let mut lines = vec![image_summary(image)];
            if let Some(path) = saved_to {
                lines.push(Line::from(Span::styled(
                    format!("   Saved to {}", path.display()),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines
        }
        Some(ImagePhase::Unavailable) | None => Vec::new(),
    }
}

/// Build the full panel text for a recipe
pub fn recipe_text(recipe: &Recipe, image: Option<&ImagePhase>, frame_count: u64) -> Text<'static> {
    let mut lines = image_lines(image, frame_count);
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        recipe.name.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        recipe.description.clone(),
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(""));

    let label = Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);
    lines.push(Line::from(vec![
        Span::styled("⏱ Prep time: ", label),
        Span::raw(recipe.prep_time.clone()),
        Span::raw("    "),
        Span::styled("⏱ Cook time: ", label),
        Span::raw(recipe.cook_time.clone()),
    ]));
    lines.push(Line::from(""));

    lines.push(heading("Ingredients"));
    for ingredient in &recipe.ingredients {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::LightYellow)),
            Span::raw(ingredient.clone()),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(heading("Instructions"));
    for (index, step) in recipe.instructions.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}. ", index + 1),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(step.clone()),
        ]));
    }

    Text::from(lines)
}

/// Largest scroll offset that still fills `area` (borders included)
///
/// Counts rows after word wrapping, so long ingredients and steps that span
/// several rows can still be scrolled fully into view.
pub fn max_scroll(text: &Text<'static>, area: Rect) -> u16 {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    if inner_width == 0 {
        return 0;
    }

    let rows = Paragraph::new(text.clone())
        .wrap(Wrap { trim: false })
        .line_count(inner_width);
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    rows.saturating_sub(inner_height)
}

/// Render the recipe panel into `area`
///
/// `scroll` is clamped to the wrapped content height and the clamped value
/// returned.
pub fn render_recipe_panel(
    frame: &mut Frame,
    area: Rect,
    recipe: &Recipe,
    image: Option<&ImagePhase>,
    scroll: u16,
    frame_count: u64,
) -> u16 {
    let text = recipe_text(recipe, image, frame_count);
    let scroll = scroll.min(max_scroll(&text, area));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recipe ")
        .title_bottom(
            Line::from(Span::styled(
                " PgUp/PgDn to scroll ",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(ratatui::layout::Alignment::Center),
        )
        .border_style(Style::default().fg(Color::LightYellow));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);

    scroll
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::test_utils::test_helpers::{sample_image, sample_recipe};

    fn plain(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_recipe_text_contains_every_field() {
        let text = plain(&recipe_text(&sample_recipe(), None, 0));

        assert!(text.contains("Lemon Garlic Chicken"));
        assert!(text.contains("Juicy chicken with a bright lemon and garlic glaze."));
        assert!(text.contains("Prep time: 10 minutes"));
        assert!(text.contains("Cook time: 25 minutes"));
        assert!(text.contains("  • 2 chicken breasts"));
        assert!(text.contains("  • 3 cloves garlic"));
        assert!(text.contains("  1. Season the chicken."));
        assert!(text.contains("  3. Glaze with lemon and garlic."));
    }

    #[test]
    fn test_instructions_are_numbered_in_order() {
        let text = plain(&recipe_text(&sample_recipe(), None, 0));
        let first = text.find("1. Season").unwrap();
        let second = text.find("2. Sear").unwrap();
        let third = text.find("3. Glaze").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_image_placeholder_while_loading() {
        let text = plain(&recipe_text(&sample_recipe(), Some(&ImagePhase::Loading), 0));
        assert!(text.contains(IMAGE_PLACEHOLDER));
        assert!(!text.contains("Image ready"));
    }

    #[test]
    fn test_image_summary_when_ready() {
        let phase = ImagePhase::Ready {
            image: sample_image(),
            saved_to: Some(PathBuf::from("/tmp/lemon.png")),
        };
        let text = plain(&recipe_text(&sample_recipe(), Some(&phase), 0));

        assert!(text.contains("Image ready (image/png, 5 B)"));
        assert!(text.contains("Saved to /tmp/lemon.png"));
        assert!(!text.contains(IMAGE_PLACEHOLDER));
    }

    #[test]
    fn test_no_image_region_when_unavailable() {
        let text = plain(&recipe_text(
            &sample_recipe(),
            Some(&ImagePhase::Unavailable),
            0,
        ));
        assert!(text.starts_with("Lemon Garlic Chicken"));
    }

    fn long_recipe() -> Recipe {
        let mut recipe = sample_recipe();
        recipe.instructions = (1..=8)
            .map(|n| {
                format!(
                    "Step {} keeps stirring the sauce slowly over a low flame until it \
                     thickens and coats the back of a spoon",
                    n
                )
            })
            .collect();
        recipe.instructions.push("Serve with FINALSTEP garnish.".to_string());
        recipe
    }

    #[test]
    fn test_max_scroll_counts_wrapped_rows() {
        let text = recipe_text(&long_recipe(), None, 0);
        let area = Rect::new(0, 0, 40, 22);

        // 20 unwrapped lines fit the inner height; the wrapped steps do not
        assert_eq!(text.lines.len(), 20);
        assert!(max_scroll(&text, area) > 0);
    }

    #[test]
    fn test_max_scroll_zero_when_content_fits() {
        let text = recipe_text(&sample_recipe(), None, 0);
        assert_eq!(max_scroll(&text, Rect::new(0, 0, 100, 40)), 0);
    }

    #[test]
    fn test_last_step_reachable_in_narrow_panel() {
        let mut terminal = Terminal::new(TestBackend::new(40, 22)).unwrap();
        let recipe = long_recipe();
        terminal
            .draw(|f| {
                let scroll = render_recipe_panel(f, f.area(), &recipe, None, u16::MAX, 0);
                assert!(scroll > 0);
            })
            .unwrap();

        let output = terminal.backend().to_string();
        assert!(output.contains("FINALSTEP"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
