//! Transaction store the intake form submits to

mod ledger;
mod traits;

pub use ledger::LedgerStore;
pub use traits::TransactionStore;

#[cfg(test)]
pub use traits::MockTransactionStore;
