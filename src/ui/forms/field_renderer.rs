//! Field rendering utilities for forms

use crate::state::{FormField, TransactionType};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus an error line
pub const FIELD_HEIGHT: u16 = 4;

fn border_style(is_active: bool, has_error: bool) -> Style {
    if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Split a field area into the input box and the error line below it
fn split_field_area(area: Rect) -> (Rect, Rect) {
    let input_height = area.height.saturating_sub(1).min(3);
    let input = Rect {
        height: input_height,
        ..area
    };
    let error = Rect {
        y: area.y + input_height,
        height: area.height.saturating_sub(input_height).min(1),
        ..area
    };
    (input, error)
}

fn draw_error_line(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(message) = error {
        let line = Line::from(Span::styled(
            format!(" ✗ {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Draw a text field with its validation error, if any
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let (input_area, error_area) = split_field_area(area);

    let value = field.display_value();
    let value_span = if value.is_empty() && !is_active {
        Span::styled("(empty)", Style::default().fg(Color::DarkGray))
    } else if is_active {
        Span::styled(value, Style::default().fg(Color::Cyan))
    } else {
        Span::raw(value)
    };

    let mut spans = vec![value_span];
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);
    draw_error_line(frame, error_area, error);
}

/// Draw the income/outcome selector as two toggle options
pub fn draw_type_selector(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let (input_area, error_area) = split_field_area(area);
    let selected = field.as_choice();

    let option = |kind: TransactionType, arrow: &'static str, color: Color| {
        let label = format!(" {arrow} {} ", kind.label());
        if selected == Some(kind) {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(color))
        }
    };

    let line = Line::from(vec![
        option(TransactionType::Income, "↑", Color::Green),
        Span::raw("  "),
        option(TransactionType::Outcome, "↓", Color::Red),
    ]);

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));

    frame.render_widget(Paragraph::new(line).block(block), input_area);
    draw_error_line(frame, error_area, error);
}
