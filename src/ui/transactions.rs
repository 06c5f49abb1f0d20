//! Transaction list and summary views

use crate::app::App;
use crate::state::{format_price, TransactionType};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Draw the income / outcome / balance cards
pub fn draw_summary(frame: &mut Frame, area: Rect, app: &App) {
    let symbol = app.config.currency_symbol();
    let summary = app.state.summary;
    let balance = summary.balance();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let cards = [
        ("Income", summary.income, Color::Green),
        ("Outcome", summary.outcome, Color::Red),
        (
            "Balance",
            balance,
            if balance < 0.0 { Color::Red } else { Color::Cyan },
        ),
    ];

    for (chunk, (title, value, color)) in chunks.iter().zip(cards) {
        let card = Paragraph::new(Line::from(Span::styled(
            format_price(symbol, value),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(card, *chunk);
    }
}

/// Draw the transaction table
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" Transactions ({}) ", app.state.transactions.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.state.transactions.is_empty() {
        let content = Paragraph::new("No transactions yet.\nPress 'n' to create a new transaction.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let symbol = app.config.currency_symbol();
    let rows = app.state.transactions.iter().map(|tx| {
        let color = match tx.kind {
            TransactionType::Income => Color::Green,
            TransactionType::Outcome => Color::Red,
        };
        Row::new(vec![
            Cell::from(tx.description.clone()),
            Cell::from(Span::styled(
                format_price(symbol, tx.signed_price()),
                Style::default().fg(color),
            )),
            Cell::from(tx.category.clone()),
            Cell::from(tx.created_at.format("%Y-%m-%d").to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(16),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Description", "Price", "Category", "Date"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▸ ")
    .block(block);

    let mut table_state = TableState::default().with_selected(Some(app.state.selected_index));
    frame.render_stateful_widget(table, area, &mut table_state);
}
