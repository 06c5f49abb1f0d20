//! Trait abstraction for the transaction store to enable mocking in tests

use crate::state::{Transaction, TransactionDraft};
use anyhow::Result;
use async_trait::async_trait;

/// Capability the new transaction form submits to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Append a validated draft, returning the stored record
    async fn create_transaction(&self, draft: TransactionDraft) -> Result<Transaction>;

    /// List stored transactions, newest first
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;
}
