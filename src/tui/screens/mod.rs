//! Screen state types for the spendlog TUI

pub mod edit;
pub mod expenses;

pub use edit::{EditField, EditScreen};
pub use expenses::ExpensesScreen;
