//! Domain events for the Session context.

use playground_core::build::BuildStatus;
use playground_core::event::{DomainEvent, EventMetadata};
use playground_core::story::StoryId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::selection::ResolutionReason;

/// Emitted when an empty editable session asks for the default story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultStoryRequested {
    /// The session identifier.
    pub session_id: Uuid,
    /// Id of the requested story.
    pub story_id: StoryId,
}

/// Emitted when the active story changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStoryResolved {
    /// The session identifier.
    pub session_id: Uuid,
    /// The story now active.
    pub story_id: StoryId,
    /// The story active before, if any.
    pub previous_story_id: Option<StoryId>,
    /// What caused the change.
    pub reason: ResolutionReason,
}

/// Emitted when the build subsystem reports a new status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStatusChanged {
    /// The session identifier.
    pub session_id: Uuid,
    /// Status before the change.
    pub from: BuildStatus,
    /// Status after the change.
    pub to: BuildStatus,
}

/// Emitted when the session tears down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTornDown {
    /// The session identifier.
    pub session_id: Uuid,
    /// Number of stories unmounted.
    pub unmounted: usize,
}

/// Event type identifier for [`DefaultStoryRequested`].
pub const DEFAULT_STORY_REQUESTED_EVENT_TYPE: &str = "session.default_story_requested";

/// Event type identifier for [`ActiveStoryResolved`].
pub const ACTIVE_STORY_RESOLVED_EVENT_TYPE: &str = "session.active_story_resolved";

/// Event type identifier for [`BuildStatusChanged`].
pub const BUILD_STATUS_CHANGED_EVENT_TYPE: &str = "session.build_status_changed";

/// Event type identifier for [`SessionTornDown`].
pub const SESSION_TORN_DOWN_EVENT_TYPE: &str = "session.torn_down";

/// Event payload variants for the Session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// The default story was requested.
    DefaultStoryRequested(DefaultStoryRequested),
    /// The active story changed.
    ActiveStoryResolved(ActiveStoryResolved),
    /// The build status changed.
    BuildStatusChanged(BuildStatusChanged),
    /// The session tore down.
    SessionTornDown(SessionTornDown),
}

impl SessionEventKind {
    /// Event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DefaultStoryRequested(_) => DEFAULT_STORY_REQUESTED_EVENT_TYPE,
            Self::ActiveStoryResolved(_) => ACTIVE_STORY_RESOLVED_EVENT_TYPE,
            Self::BuildStatusChanged(_) => BUILD_STATUS_CHANGED_EVENT_TYPE,
            Self::SessionTornDown(_) => SESSION_TORN_DOWN_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Session context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("SessionEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
