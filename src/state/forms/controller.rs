//! Submission controller for the new transaction dialog
//!
//! Owns the form for one dialog presentation and drives it through
//! `Idle -> Submitting -> Idle`. A submission is only forwarded to the
//! injected [`TransactionStore`] after the schema accepts every field, and at
//! most one submission is in flight at a time.

use super::form_state::NewTransactionForm;
use super::schema::{self, TransactionField, ValidationError, ValidationErrors};
use crate::state::{Transaction, TransactionDraft, TransactionType};
use crate::store::TransactionStore;
use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Where the controller is in its submission cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
}

/// Result of asking the controller to submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validated; the draft must now be handed to the store
    Accepted(TransactionDraft),
    /// Validation failed; nothing was forwarded
    Rejected(ValidationErrors),
    /// A submission is already in flight
    Ignored,
}

/// Result of a full submit including the store call
#[allow(dead_code)]
#[derive(Debug)]
pub enum SubmitResult {
    Created(Transaction),
    Rejected(ValidationErrors),
    Ignored,
    Failed(anyhow::Error),
}

pub struct FormController {
    /// Identifies this dialog presentation in store completions
    id: Uuid,
    form: NewTransactionForm,
    status: SubmitStatus,
    errors: Option<ValidationErrors>,
    submit_error: Option<String>,
    store: Arc<dyn TransactionStore>,
}

impl FormController {
    /// Create a controller with an empty form bound to `store`
    pub fn new(store: Arc<dyn TransactionStore>, default_type: Option<TransactionType>) -> Self {
        Self {
            id: Uuid::new_v4(),
            form: NewTransactionForm::new(default_type),
            status: SubmitStatus::Idle,
            errors: None,
            submit_error: None,
            store,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &NewTransactionForm {
        &self.form
    }

    /// Mutable form access for field edits; edits are allowed while submitting
    pub fn form_mut(&mut self) -> &mut NewTransactionForm {
        &mut self.form
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Whether the submit button accepts presses
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    /// Validation error for a field from the last rejected attempt
    pub fn field_error(&self, field: TransactionField) -> Option<&ValidationError> {
        self.errors.as_ref().and_then(|e| e.for_field(field))
    }

    /// Message from the last failed store call
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn store(&self) -> Arc<dyn TransactionStore> {
        Arc::clone(&self.store)
    }

    /// Validate the form and, if accepted, enter `Submitting`
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.is_submitting() {
            tracing::debug!("Submit ignored: a transaction is already being created");
            return SubmitOutcome::Ignored;
        }

        match schema::validate(&self.form.input()) {
            Ok(draft) => {
                tracing::info!(
                    "Submitting {} transaction \"{}\"",
                    draft.kind,
                    draft.description
                );
                self.errors = None;
                self.submit_error = None;
                self.status = SubmitStatus::Submitting;
                SubmitOutcome::Accepted(draft)
            }
            Err(errors) => {
                tracing::info!("Transaction rejected: {errors}");
                self.errors = Some(errors.clone());
                SubmitOutcome::Rejected(errors)
            }
        }
    }

    /// Leave `Submitting` once the store call has completed
    ///
    /// On success the form is reset to its initial state. On failure the
    /// entered values are kept and the error is recorded so the user can
    /// retry.
    pub fn finish_submit<T>(&mut self, result: &Result<T>) {
        if !self.is_submitting() {
            tracing::warn!("Store completion received while idle");
            return;
        }
        self.status = SubmitStatus::Idle;

        match result {
            Ok(_) => {
                self.form.reset();
                self.errors = None;
                self.submit_error = None;
            }
            Err(err) => {
                tracing::warn!("Failed to create transaction: {err:#}");
                self.submit_error = Some(format!("Failed to create transaction: {err}"));
            }
        }
    }

    /// Validate, call the store and settle the form in one step
    #[allow(dead_code)]
    pub async fn submit(&mut self) -> SubmitResult {
        let draft = match self.begin_submit() {
            SubmitOutcome::Accepted(draft) => draft,
            SubmitOutcome::Rejected(errors) => return SubmitResult::Rejected(errors),
            SubmitOutcome::Ignored => return SubmitResult::Ignored,
        };

        let result = self.store.create_transaction(draft).await;
        self.finish_submit(&result);
        match result {
            Ok(transaction) => SubmitResult::Created(transaction),
            Err(err) => SubmitResult::Failed(err),
        }
    }
}
