//! Route modules organized by bounded context.

pub mod conversation;
pub mod health;
pub mod stories;
