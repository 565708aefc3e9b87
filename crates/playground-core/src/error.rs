//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::story::StoryId;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The story set is empty while the session is view-only. Nothing can be
    /// rendered and the session halts.
    #[error("No stories found! Please contact the author")]
    NoStoriesInViewOnlyMode,

    /// A story id was not present in the story set.
    #[error("story not found: {0}")]
    StoryNotFound(StoryId),

    /// A story with the same id is already in the story set.
    #[error("story already exists: {0}")]
    DuplicateStory(StoryId),

    /// No mounted session has the given id.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// The session has already torn down and accepts no further changes.
    #[error("session torn down: {0}")]
    SessionTornDown(Uuid),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error (lock poisoning, collaborator failure).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Stable machine-readable code for the error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoStoriesInViewOnlyMode => "NO_STORIES_IN_VIEW_ONLY_MODE",
            Self::StoryNotFound(_) => "STORY_NOT_FOUND",
            Self::DuplicateStory(_) => "DUPLICATE_STORY",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::SessionTornDown(_) => "SESSION_TORN_DOWN",
            Self::Validation(_) => "VALIDATION",
            Self::Infrastructure(_) => "INFRASTRUCTURE",
        }
    }

    /// Returns `true` for conditions that halt the session and must not be
    /// retried.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoStoriesInViewOnlyMode)
    }
}
