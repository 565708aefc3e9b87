//! Domain events for the Story Set context.

use playground_core::event::{DomainEvent, EventMetadata};
use playground_core::story::StoryId;
use serde::{Deserialize, Serialize};

/// Emitted when a story joins the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryAdded {
    /// The added story.
    pub story_id: StoryId,
    /// Its title.
    pub title: String,
}

/// Emitted when a story leaves the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRemoved {
    /// The removed story.
    pub story_id: StoryId,
}

/// Event type identifier for [`StoryAdded`].
pub const STORY_ADDED_EVENT_TYPE: &str = "stories.story_added";

/// Event type identifier for [`StoryRemoved`].
pub const STORY_REMOVED_EVENT_TYPE: &str = "stories.story_removed";

/// Event payload variants for the Story Set context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorySetEventKind {
    /// A story was added.
    StoryAdded(StoryAdded),
    /// A story was removed.
    StoryRemoved(StoryRemoved),
}

/// Membership-changed notification published by a story set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorySetEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: StorySetEventKind,
}

impl StorySetEvent {
    /// The story whose membership changed.
    #[must_use]
    pub fn story_id(&self) -> &StoryId {
        match &self.kind {
            StorySetEventKind::StoryAdded(payload) => &payload.story_id,
            StorySetEventKind::StoryRemoved(payload) => &payload.story_id,
        }
    }
}

impl DomainEvent for StorySetEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            StorySetEventKind::StoryAdded(_) => STORY_ADDED_EVENT_TYPE,
            StorySetEventKind::StoryRemoved(_) => STORY_REMOVED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("StorySetEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
