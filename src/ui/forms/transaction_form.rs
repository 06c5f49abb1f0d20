//! New transaction dialog rendering

use super::field_renderer::{draw_field, draw_type_selector, FIELD_HEIGHT};
use crate::state::{Form, FormController, SubmitStatus, TransactionField};
use crate::ui::components::{centered_rect, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const DIALOG_WIDTH: u16 = 56;
// borders + margin + four fields + button + help line
const DIALOG_HEIGHT: u16 = 2 + 2 + FIELD_HEIGHT * 4 + BUTTON_HEIGHT + 1;

/// Draw the dialog centered over the current screen
pub fn draw_new_transaction(frame: &mut Frame, controller: &FormController) {
    let dialog_area = centered_rect(frame.area(), DIALOG_WIDTH, DIALOG_HEIGHT);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(Span::styled(
            " New Transaction ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Description
            Constraint::Length(FIELD_HEIGHT),  // Price
            Constraint::Length(FIELD_HEIGHT),  // Category
            Constraint::Length(FIELD_HEIGHT),  // Type
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Help text
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let form = controller.form();
    let error_for =
        |field: TransactionField| controller.field_error(field).map(|e| e.kind.message());

    for (idx, field) in TransactionField::ALL.iter().enumerate() {
        let is_active = form.active_field() == idx;
        let error = error_for(*field);
        let area = chunks[idx];
        if *field == TransactionField::Type {
            draw_type_selector(frame, area, form.field(*field), is_active, error.as_deref());
        } else {
            draw_field(frame, area, form.field(*field), is_active, error.as_deref());
        }
    }

    let label = match controller.status() {
        SubmitStatus::Submitting => "Submitting...",
        SubmitStatus::Idle => "Create",
    };
    render_button(
        frame,
        chunks[4],
        label,
        form.is_submit_row_active(),
        controller.can_submit(),
        Color::Green,
    );

    if let Some(message) = controller.submit_error() {
        let error = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)));
        frame.render_widget(error, chunks[5]);
        return;
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next  "),
        Span::styled("←→", Style::default().fg(Color::Cyan)),
        Span::raw(": type  "),
        Span::styled(
            crate::platform::SUBMIT_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": create  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": cancel"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[5]);
}
