//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every story-set and session command.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted command name, e.g. `session.select_story`, used in log fields.
    fn command_type(&self) -> &'static str;

    /// Correlation ID carried into the metadata of every event the command
    /// produces.
    fn correlation_id(&self) -> Uuid;
}
