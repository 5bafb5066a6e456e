//! Command abstractions.

use uuid::Uuid;

use crate::id::UserId;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the request that issued it.
    fn correlation_id(&self) -> Uuid;

    /// The user on whose behalf the command runs, when the caller named one.
    fn requester(&self) -> Option<UserId> {
        None
    }
}
