//! Application services for the Conversation context.

pub mod command_handlers;
