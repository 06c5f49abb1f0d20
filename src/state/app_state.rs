//! Application state definitions

use super::forms::FormController;
use super::transaction::{Summary, Transaction};
use std::collections::VecDeque;

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Data
    pub transactions: Vec<Transaction>,
    pub summary: Summary,

    // Selection
    pub selected_index: usize,

    /// New transaction dialog, present while it is open
    pub new_transaction: Option<FormController>,

    /// Errors waiting to be shown, oldest first
    pub error_queue: VecDeque<String>,
}

impl AppState {
    /// Replace the transaction list and recompute totals
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.summary = Summary::from_transactions(&transactions);
        self.transactions = transactions;
        if self.selected_index >= self.transactions.len() {
            self.selected_index = self.transactions.len().saturating_sub(1);
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.transactions.len() {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn is_dialog_open(&self) -> bool {
        self.new_transaction.is_some()
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}
