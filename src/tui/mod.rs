//! Terminal user interface for spendlog
//!
//! Two screens: the expense table (which owns the selection) and the edit
//! form for a single selected expense.

pub mod app;
pub mod screens;
pub mod ui;

pub use app::App;
