//! Application state module

mod app_state;
mod forms;
mod transaction;

pub use app_state::*;
pub use forms::*;
pub use transaction::*;
