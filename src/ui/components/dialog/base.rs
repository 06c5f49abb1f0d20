//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;
// two columns of padding on each side
const PADDING: u16 = 4;

/// Rect of the given size centered in `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render a centered message box: bold title, wrapped message, hint line
pub fn render_dialog(frame: &mut Frame, title: &str, accent: Color, message: &str, hint: Line) {
    let lines = wrap_text(message, (MAX_WIDTH - PADDING - 2) as usize);

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain([title.chars().count(), hint.width()])
        .max()
        .unwrap_or(0) as u16;
    let width = (content_width + PADDING + 2).min(MAX_WIDTH);
    // title, blank, message, blank, hint, borders
    let height = lines.len() as u16 + 6;
    let area = centered_rect(frame.area(), width, height);

    let mut content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(lines.into_iter().map(Line::from));
    content.push(Line::from(""));
    content.push(hint);

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .padding(Padding::horizontal(2))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.len() + word.len() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_breaks_on_words() {
        let lines = wrap_text("Failed to create transaction: disk full", 20);
        assert_eq!(lines, vec!["Failed to create", "transaction: disk", "full"]);
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        let lines = wrap_text("a\n\nb", 10);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        assert_eq!(centered_rect(area, 60, 20), area);
    }
}
