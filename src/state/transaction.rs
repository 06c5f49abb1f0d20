//! Transaction domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Outcome,
}

impl TransactionType {
    /// Wire value used by the validator and the ledger snapshot
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }

    /// Label shown on the type selector
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Outcome => "Outcome",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            TransactionType::Income => TransactionType::Outcome,
            TransactionType::Outcome => TransactionType::Income,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known transaction type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    /// Exact match only: "Income" or " income" are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "outcome" => Ok(TransactionType::Outcome),
            other => Err(UnknownTransactionType(other.to_string())),
        }
    }
}

/// A validated transaction that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// A transaction as recorded by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn from_draft(draft: TransactionDraft, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            kind: draft.kind,
            created_at,
        }
    }

    /// Price with the sign of its direction (outcomes are negative)
    pub fn signed_price(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.price,
            TransactionType::Outcome => -self.price,
        }
    }
}

/// Totals over a list of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub outcome: f64,
}

impl Summary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut acc, tx| {
            match tx.kind {
                TransactionType::Income => acc.income += tx.price,
                TransactionType::Outcome => acc.outcome += tx.price,
            }
            acc
        })
    }

    pub fn balance(&self) -> f64 {
        self.income - self.outcome
    }
}

/// Format a price for display with the given currency prefix
pub fn format_price(symbol: &str, value: f64) -> String {
    if value < 0.0 {
        format!("-{symbol}{:.2}", value.abs())
    } else {
        format!("{symbol}{value:.2}")
    }
}
