//! Form rendering module
//!
//! - `field_renderer`: field and type selector rendering
//! - `transaction_form`: the new transaction dialog

mod field_renderer;
mod transaction_form;

pub use transaction_form::draw_new_transaction;
