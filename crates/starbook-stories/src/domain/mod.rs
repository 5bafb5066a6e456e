//! Domain model for the Story context.

pub mod commands;
pub mod fields;
pub mod repository;
pub mod story;
pub mod validation;
