//! Client for the remote expense service.
//!
//! The service has no stable record ids: listing is positional and edits match
//! on the record's previous field values. See [`crate::session`] for the state
//! the client is driven by.

pub mod client;
pub mod errors;

pub use client::{
    EditCategoryRequest, EditCostRequest, EditDateRequest, ExpenseApi, HttpExpenseClient,
};
pub use errors::ApiError;
