//! Form domain layer
//!
//! Type-safe handling of the new transaction dialog:
//! - `field`: field value objects
//! - `schema`: validation and coercion of raw input
//! - `form_state`: the form's fields and focus
//! - `controller`: the submission state machine

mod controller;
mod field;
mod form_state;
mod schema;

pub use controller::{FormController, SubmitOutcome, SubmitStatus};
pub use field::FormField;
pub use form_state::Form;
pub use schema::TransactionField;
