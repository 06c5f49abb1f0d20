//! Error dialog component

use super::base::render_dialog;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the oldest queued error, noting how many more are waiting
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, queued: usize) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut hint = vec![
        Span::styled("Enter", key_style),
        Span::raw("/"),
        Span::styled("Esc", key_style),
        Span::raw(" dismiss"),
    ];
    if queued > 1 {
        hint.push(Span::styled(
            format!("  ({} more)", queued - 1),
            Style::default().fg(Color::DarkGray),
        ));
    }

    render_dialog(frame, "Error", Color::Red, error_message, Line::from(hint));
}
