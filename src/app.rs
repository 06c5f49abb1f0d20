//! Application state and core logic

use crate::config::TuiConfig;
use crate::state::{AppState, Form, FormController, SubmitOutcome, Transaction, TransactionType};
use crate::store::{LedgerStore, TransactionStore};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Store result tagged with the id of the dialog that submitted it
type Completion = (Uuid, Result<Transaction>);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// User configuration
    pub config: TuiConfig,
    /// Store new transactions are submitted to
    store: Arc<dyn TransactionStore>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
    /// Store results from background submissions
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl App {
    /// Create a new App instance backed by the configured ledger
    pub async fn new(config: TuiConfig) -> Result<Self> {
        let store = match config.ledger_path() {
            Some(path) => LedgerStore::open(path).await?,
            None => LedgerStore::in_memory(),
        };
        Self::with_store(config, Arc::new(store)).await
    }

    /// Create an App around an existing store
    pub async fn with_store(config: TuiConfig, store: Arc<dyn TransactionStore>) -> Result<Self> {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();
        state.set_transactions(store.list_transactions().await?);

        Ok(Self {
            state,
            config,
            store,
            quit: false,
            status_message: None,
            completions_tx,
            completions_rx,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Open the new transaction dialog with an empty form
    pub fn open_new_transaction(&mut self) {
        let default_type: Option<TransactionType> = self.config.default_type;
        self.state.new_transaction = Some(FormController::new(self.store.clone(), default_type));
    }

    /// Dismiss the dialog, discarding the draft
    pub fn close_new_transaction(&mut self) {
        if let Some(controller) = self.state.new_transaction.take() {
            if controller.is_submitting() {
                tracing::debug!("Dialog closed with a submission in flight");
            }
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.is_dialog_open() {
            self.handle_new_transaction_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;
        self.handle_list_key(key).await
    }

    /// Handle keys in the transaction list
    async fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('n') => self.open_new_transaction(),
            KeyCode::Char('r') => self.refresh_transactions().await,
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the new transaction dialog
    fn handle_new_transaction_key(&mut self, key: KeyEvent) {
        let submit_shortcut = key.code == KeyCode::Char('s')
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER));
        if submit_shortcut {
            self.submit_new_transaction();
            return;
        }

        let Some(controller) = self.state.new_transaction.as_mut() else {
            return;
        };
        let form = controller.form_mut();
        let on_submit_row = form.is_submit_row_active();

        match key.code {
            KeyCode::Esc => self.close_new_transaction(),
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Enter if on_submit_row => self.submit_new_transaction(),
            KeyCode::Enter => form.next_field(),
            KeyCode::Left if form.active_field() == 3 => {
                form.kind.set_choice(TransactionType::Income)
            }
            KeyCode::Right if form.active_field() == 3 => {
                form.kind.set_choice(TransactionType::Outcome)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    /// Validate the open form and hand an accepted draft to the store
    ///
    /// The store call runs as a background task; its result comes back
    /// through [`App::poll_completions`].
    fn submit_new_transaction(&mut self) {
        let Some(controller) = self.state.new_transaction.as_mut() else {
            return;
        };

        match controller.begin_submit() {
            SubmitOutcome::Accepted(draft) => {
                let id = controller.id();
                let store = controller.store();
                let tx = self.completions_tx.clone();
                tokio::spawn(async move {
                    let result = store.create_transaction(draft).await;
                    // Receiver only goes away when the app shuts down
                    let _ = tx.send((id, result));
                });
            }
            SubmitOutcome::Rejected(errors) => {
                let fields: Vec<&str> = errors.fields().map(|f| f.name()).collect();
                self.status_message = Some(format!(
                    "{} field(s) need attention: {}",
                    errors.len(),
                    fields.join(", ")
                ));
            }
            SubmitOutcome::Ignored => {}
        }
    }

    /// Apply finished background submissions
    pub async fn poll_completions(&mut self) {
        while let Ok((id, result)) = self.completions_rx.try_recv() {
            self.complete_submission(id, result).await;
        }
    }

    /// Settle the dialog that sent `id`; results for dismissed dialogs still update the list
    async fn complete_submission(&mut self, id: Uuid, result: Result<Transaction>) {
        match self.state.new_transaction.as_mut() {
            Some(controller) if controller.id() == id => controller.finish_submit(&result),
            _ => tracing::debug!("Completion for dismissed dialog {id}"),
        }

        match result {
            Ok(transaction) => {
                tracing::info!("Created transaction {}", transaction.id);
                self.status_message = Some("Transaction created!".to_string());
                self.refresh_transactions().await;
            }
            Err(err) => self.push_error(format!("Failed to create transaction: {err}")),
        }
    }

    /// Reload the transaction list from the store
    async fn refresh_transactions(&mut self) {
        match self.store.list_transactions().await {
            Ok(transactions) => self.state.set_transactions(transactions),
            Err(err) => {
                tracing::warn!("Failed to list transactions: {err:#}");
                self.push_error("Failed to load transactions");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SubmitStatus, TransactionField};
    use crate::store::MockTransactionStore;
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    async fn ledger_app() -> App {
        App::with_store(TuiConfig::default(), Arc::new(LedgerStore::in_memory()))
            .await
            .unwrap()
    }

    /// Fill description, price, category and type, leaving focus on submit
    async fn fill_salary(app: &mut App) {
        type_text(app, "Salary").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "2500").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "Job").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Left)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
    }

    async fn settle(app: &mut App) {
        let (id, result) = app.completions_rx.recv().await.unwrap();
        app.complete_submission(id, result).await;
    }

    #[tokio::test]
    async fn test_n_opens_empty_dialog() {
        let mut app = ledger_app().await;
        assert!(!app.state.is_dialog_open());
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();

        let controller = app.state.new_transaction.as_ref().unwrap();
        assert_eq!(controller.form().description.as_text(), "");
        assert_eq!(controller.status(), SubmitStatus::Idle);
    }

    #[tokio::test]
    async fn test_dialog_uses_configured_default_type() {
        let config = TuiConfig {
            default_type: Some(TransactionType::Outcome),
            ..Default::default()
        };
        let mut app = App::with_store(config, Arc::new(LedgerStore::in_memory()))
            .await
            .unwrap();
        app.open_new_transaction();

        let controller = app.state.new_transaction.as_ref().unwrap();
        assert_eq!(
            controller.form().kind.as_choice(),
            Some(TransactionType::Outcome)
        );
    }

    #[tokio::test]
    async fn test_typing_q_in_dialog_does_not_quit() {
        let mut app = ledger_app().await;
        app.open_new_transaction();
        type_text(&mut app, "quiz").await;

        assert!(!app.should_quit());
        let controller = app.state.new_transaction.as_ref().unwrap();
        assert_eq!(controller.form().description.as_text(), "quiz");
    }

    #[tokio::test]
    async fn test_esc_discards_draft() {
        let mut app = ledger_app().await;
        app.open_new_transaction();
        type_text(&mut app, "Lunch").await;
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(!app.state.is_dialog_open());

        app.open_new_transaction();
        let controller = app.state.new_transaction.as_ref().unwrap();
        assert_eq!(controller.form().description.as_text(), "");
    }

    #[tokio::test]
    async fn test_full_submission_stores_and_clears_form() {
        let mut app = ledger_app().await;
        app.open_new_transaction();
        fill_salary(&mut app).await;

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app
            .state
            .new_transaction
            .as_ref()
            .unwrap()
            .is_submitting());

        settle(&mut app).await;

        assert_eq!(app.state.transactions.len(), 1);
        let stored = &app.state.transactions[0];
        assert_eq!(stored.description, "Salary");
        assert_eq!(stored.price, 2500.0);
        assert_eq!(stored.category, "Job");
        assert_eq!(stored.kind, TransactionType::Income);
        assert_eq!(app.state.summary.income, 2500.0);

        let controller = app.state.new_transaction.as_ref().unwrap();
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert_eq!(controller.form().description.as_text(), "");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Transaction created!")
        );
    }

    #[tokio::test]
    async fn test_repeated_submit_while_in_flight_calls_store_once() {
        let mut store = MockTransactionStore::new();
        store.expect_list_transactions().returning(|| Ok(Vec::new()));
        store
            .expect_create_transaction()
            .times(1)
            .returning(|draft| {
                Ok(Transaction::from_draft(
                    draft,
                    uuid::Uuid::new_v4(),
                    chrono::Utc::now(),
                ))
            });

        let mut app = App::with_store(TuiConfig::default(), Arc::new(store))
            .await
            .unwrap();
        app.open_new_transaction();
        fill_salary(&mut app).await;

        app.handle_key(ctrl('s')).await.unwrap();
        app.handle_key(ctrl('s')).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        settle(&mut app).await;
        assert!(app.completions_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_invalid_submission_shows_field_errors() {
        let mut app = ledger_app().await;
        app.open_new_transaction();
        app.handle_key(ctrl('s')).await.unwrap();

        let controller = app.state.new_transaction.as_ref().unwrap();
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert!(controller
            .field_error(TransactionField::Description)
            .is_some());
        assert_eq!(
            app.status_message.as_deref(),
            Some("4 field(s) need attention: description, price, category, type")
        );
        assert!(app.completions_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_store_failure_is_queued_as_error() {
        let mut store = MockTransactionStore::new();
        store.expect_list_transactions().returning(|| Ok(Vec::new()));
        store
            .expect_create_transaction()
            .returning(|_| Err(anyhow!("ledger is read-only")));

        let mut app = App::with_store(TuiConfig::default(), Arc::new(store))
            .await
            .unwrap();
        app.open_new_transaction();
        fill_salary(&mut app).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        settle(&mut app).await;

        assert_eq!(
            app.state.current_error(),
            Some("Failed to create transaction: ledger is read-only")
        );
        let controller = app.state.new_transaction.as_ref().unwrap();
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert_eq!(controller.form().description.as_text(), "Salary");

        // Error dialog swallows keys until dismissed
        app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
        assert!(app.state.has_errors());
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(!app.state.has_errors());
    }

    #[tokio::test]
    async fn test_completion_after_dismiss_still_refreshes_list() {
        let mut app = ledger_app().await;
        app.open_new_transaction();
        fill_salary(&mut app).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        settle(&mut app).await;
        assert!(!app.state.is_dialog_open());
        assert_eq!(app.state.transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_completion_does_not_settle_newer_dialog() {
        let mut app = ledger_app().await;
        app.open_new_transaction();
        fill_salary(&mut app).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        type_text(&mut app, "Rent").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "900").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "Home").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        let current = app.state.new_transaction.as_ref().unwrap().id();
        let first = app.completions_rx.recv().await.unwrap();
        let second = app.completions_rx.recv().await.unwrap();
        let (own, stale) = if first.0 == current {
            (first, second)
        } else {
            (second, first)
        };

        app.complete_submission(stale.0, stale.1).await;
        let controller = app.state.new_transaction.as_ref().unwrap();
        assert!(controller.is_submitting());
        assert!(!controller.can_submit());
        assert_eq!(controller.form().description.as_text(), "Rent");
        assert_eq!(app.state.transactions.len(), 2);

        app.complete_submission(own.0, own.1).await;
        let controller = app.state.new_transaction.as_ref().unwrap();
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert_eq!(controller.form().description.as_text(), "");
    }

    #[tokio::test]
    async fn test_q_quits_from_list() {
        let mut app = ledger_app().await;
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit());
    }
}
