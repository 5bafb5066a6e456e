//! Starbook — Conversation bounded context.
//!
//! Drives the story-authoring wizard: capture the situation, clarify the
//! missing STAR sections, refine, then generate a draft story. The server
//! keeps no conversation state; callers send the state with every request
//! and receive the updated state back.

pub mod application;
pub mod assistant;
pub mod domain;
