//! Story handles, descriptors and the story command port.
//!
//! Stories are owned by the story-set collaborator. The session only holds
//! [`StoryHandle`]s, reads their ids, and calls [`Story::unmount`] on
//! teardown.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Id of the story synthesized when an editable session starts empty.
pub const DEFAULT_STORY_ID: &str = "0";

/// Title of the story synthesized when an editable session starts empty.
pub const DEFAULT_STORY_TITLE: &str = "Default Story";

/// Unique identifier of a story within a story set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for StoryId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for StoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Script source and compiled output for a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryScript {
    /// Authored source.
    #[serde(default)]
    pub raw: String,
    /// Compiled output.
    #[serde(default)]
    pub compiled: String,
}

/// Payload of `add_story_and_subscribe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDescriptor {
    /// Story identifier.
    pub id: StoryId,
    /// Human-readable title.
    pub title: String,
    /// Story script.
    #[serde(default)]
    pub script: StoryScript,
}

impl StoryDescriptor {
    /// The descriptor an editable session inserts when it finds no stories.
    #[must_use]
    pub fn default_story() -> Self {
        Self {
            id: StoryId::from(DEFAULT_STORY_ID),
            title: DEFAULT_STORY_TITLE.to_owned(),
            script: StoryScript::default(),
        }
    }

    /// Checks the descriptor before it enters a story set.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.is_blank() {
            return Err(DomainError::Validation("story id must not be blank".into()));
        }
        Ok(())
    }
}

/// A mounted story as seen by the session.
pub trait Story: Send + Sync + fmt::Debug {
    /// Returns the story id.
    fn id(&self) -> &StoryId;

    /// Returns the story title.
    fn title(&self) -> &str;

    /// Returns `false` once [`Story::unmount`] has run.
    fn is_mounted(&self) -> bool;

    /// Releases the story's resources. Called once per story on session
    /// teardown.
    fn unmount(&self);
}

/// Shared handle to a story owned by a story set.
pub type StoryHandle = Arc<dyn Story>;

/// Write port into the story subsystem.
///
/// Implementations may apply the insert immediately or later; the session
/// never assumes the new story is visible before its next reactive pass.
pub trait StoryCommands: Send + Sync {
    /// Adds a story built from `descriptor` and subscribes it to the build.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the story subsystem rejects the story.
    fn add_story_and_subscribe(
        &self,
        descriptor: StoryDescriptor,
        correlation_id: Uuid,
    ) -> Result<(), DomainError>;
}
