//! Layout components (summary, content, status bar)

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into summary cards, transaction list and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Summary
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

fn get_hints(app: &App) -> &'static str {
    if app.state.has_errors() {
        " Enter/Esc: dismiss"
    } else if app.state.is_dialog_open() {
        " Tab: next field | ←→: type | Enter: create | Esc: cancel"
    } else {
        " n: new | ↑↓: select | r: refresh | q: quit"
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        get_hints(app),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
