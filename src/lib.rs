//! spendlog: a terminal client for a small remote expense service.
//!
//! The service keys records by position and matches edits on previous field
//! values; [`session::EditSession`] holds the draft/snapshot state that
//! contract requires, [`api`] speaks the wire protocol, and [`tui`] puts an
//! expense table and edit form on top.

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod session;
pub mod tui;
