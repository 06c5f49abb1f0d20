//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod transactions;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (summary_area, main_area, status_area) = layout::create_layout(frame.area());

    transactions::draw_summary(frame, summary_area, app);
    transactions::draw_list(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Overlays, topmost last
    if let Some(controller) = &app.state.new_transaction {
        forms::draw_new_transaction(frame, controller);
    }

    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error, app.state.error_queue.len());
    }
}
