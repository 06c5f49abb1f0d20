//! In-process ledger store
//!
//! Keeps transactions in memory and, when given a path, mirrors them to a
//! JSON snapshot after every append.

use super::traits::TransactionStore;
use crate::state::{Transaction, TransactionDraft};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Store backed by a vector, optionally snapshotted to disk
pub struct LedgerStore {
    transactions: Mutex<Vec<Transaction>>,
    snapshot_path: Option<PathBuf>,
}

impl LedgerStore {
    /// Create an empty store with no snapshot file
    pub fn in_memory() -> Self {
        Self {
            transactions: Mutex::new(Vec::new()),
            snapshot_path: None,
        }
    }

    /// Open a store mirrored to `path`, loading it if it exists
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let transactions: Vec<Transaction> = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read ledger {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse ledger {}", path.display()))?
        } else {
            Vec::new()
        };
        tracing::info!(
            "Opened ledger {} with {} transactions",
            path.display(),
            transactions.len()
        );

        Ok(Self {
            transactions: Mutex::new(transactions),
            snapshot_path: Some(path),
        })
    }

    async fn write_snapshot(path: &Path, transactions: &[Transaction]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(transactions)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write ledger {}", path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for LedgerStore {
    async fn create_transaction(&self, draft: TransactionDraft) -> Result<Transaction> {
        let transaction = Transaction::from_draft(draft, Uuid::new_v4(), Utc::now());

        let mut transactions = self.transactions.lock().await;
        transactions.push(transaction.clone());
        if let Some(path) = &self.snapshot_path {
            if let Err(err) = Self::write_snapshot(path, &transactions).await {
                transactions.pop();
                return Err(err);
            }
        }

        tracing::debug!("Stored transaction {}", transaction.id);
        Ok(transaction)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.lock().await;
        let mut listed = transactions.clone();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}
