//! Domain model for the Conversation context.

pub mod commands;
pub mod message;
pub mod state;
pub mod step;
