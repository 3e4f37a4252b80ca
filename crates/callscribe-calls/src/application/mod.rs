//! Application-level handlers for call lifecycle events.

pub mod command_handlers;
pub mod query_handlers;
