//! Application services for the Story context.

pub mod command_handlers;
pub mod query_handlers;
