//! The insertion-ordered story set and its point-in-time snapshots.

use playground_core::clock::Clock;
use playground_core::error::DomainError;
use playground_core::event::EventMetadata;
use playground_core::story::{StoryHandle, StoryId};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{
    STORY_ADDED_EVENT_TYPE, STORY_REMOVED_EVENT_TYPE, StoryAdded, StoryRemoved, StorySetEvent,
    StorySetEventKind,
};

/// Default number of membership events buffered per subscriber.
pub const DEFAULT_EVENT_BUFFER_CAPACITY: usize = 64;

/// Mapping from story id to story handle.
///
/// Enumeration order is insertion order. The session's "first story"
/// fallback relies on it.
#[derive(Debug)]
pub struct StorySet {
    /// Story set identifier.
    pub id: Uuid,
    /// Number of membership changes applied.
    pub(crate) version: i64,
    entries: Vec<StoryHandle>,
    sender: broadcast::Sender<StorySetEvent>,
}

impl StorySet {
    /// Creates an empty story set with the default event buffer.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self::with_event_capacity(id, DEFAULT_EVENT_BUFFER_CAPACITY)
    }

    /// Creates an empty story set buffering up to `capacity` membership
    /// events per subscriber. A zero capacity is raised to one.
    #[must_use]
    pub fn with_event_capacity(id: Uuid, capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self {
            id,
            version: 0,
            entries: Vec::new(),
            sender,
        }
    }

    /// Returns the number of membership changes applied so far.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Returns the number of stories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no stories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if a story with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &StoryId) -> bool {
        self.position(id).is_some()
    }

    /// Looks up a story by id.
    #[must_use]
    pub fn get(&self, id: &StoryId) -> Option<&StoryHandle> {
        self.entries.iter().find(|story| story.id() == id)
    }

    /// Iterates stories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StoryHandle> {
        self.entries.iter()
    }

    /// Subscribes to membership-changed events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StorySetEvent> {
        self.sender.subscribe()
    }

    /// Captures the current membership.
    #[must_use]
    pub fn snapshot(&self) -> StorySnapshot {
        StorySnapshot::new(self.version, self.entries.clone())
    }

    /// Appends a story and publishes a `StoryAdded` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateStory` if the id is already present.
    pub fn insert(
        &mut self,
        story: StoryHandle,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<StorySetEvent, DomainError> {
        if self.contains(story.id()) {
            return Err(DomainError::DuplicateStory(story.id().clone()));
        }

        let kind = StorySetEventKind::StoryAdded(StoryAdded {
            story_id: story.id().clone(),
            title: story.title().to_owned(),
        });
        self.entries.push(story);
        Ok(self.record(STORY_ADDED_EVENT_TYPE, kind, correlation_id, clock))
    }

    /// Removes a story and publishes a `StoryRemoved` event. The removed
    /// handle is returned to the caller; it is not unmounted here.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoryNotFound` if no story has `id`.
    pub fn remove(
        &mut self,
        id: &StoryId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(StoryHandle, StorySetEvent), DomainError> {
        let index = self
            .position(id)
            .ok_or_else(|| DomainError::StoryNotFound(id.clone()))?;

        let story = self.entries.remove(index);
        let kind = StorySetEventKind::StoryRemoved(StoryRemoved {
            story_id: id.clone(),
        });
        let event = self.record(STORY_REMOVED_EVENT_TYPE, kind, correlation_id, clock);
        Ok((story, event))
    }

    fn position(&self, id: &StoryId) -> Option<usize> {
        self.entries.iter().position(|story| story.id() == id)
    }

    fn record(
        &mut self,
        event_type: &str,
        kind: StorySetEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> StorySetEvent {
        self.version += 1;
        let event = StorySetEvent {
            metadata: EventMetadata::caused_by_command(
                event_type,
                self.id,
                self.version,
                correlation_id,
                clock.now(),
            ),
            kind,
        };
        // No subscribers is not an error.
        let _ = self.sender.send(event.clone());
        event
    }
}

/// Immutable view of a story set's membership at one version.
#[derive(Debug, Clone, Default)]
pub struct StorySnapshot {
    version: i64,
    stories: Vec<StoryHandle>,
}

impl StorySnapshot {
    /// Builds a snapshot from stories in enumeration order.
    #[must_use]
    pub fn new(version: i64, stories: Vec<StoryHandle>) -> Self {
        Self { version, stories }
    }

    /// Version of the set this snapshot was taken from.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Returns the number of stories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Returns `true` if the snapshot holds no stories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Returns `true` if a story with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &StoryId) -> bool {
        self.stories.iter().any(|story| story.id() == id)
    }

    /// Looks up a story by id.
    #[must_use]
    pub fn get(&self, id: &StoryId) -> Option<&StoryHandle> {
        self.stories.iter().find(|story| story.id() == id)
    }

    /// Id of the first story in enumeration order.
    #[must_use]
    pub fn first_id(&self) -> Option<&StoryId> {
        self.stories.first().map(|story| story.id())
    }

    /// Story ids in enumeration order.
    #[must_use]
    pub fn ids(&self) -> Vec<StoryId> {
        self.stories.iter().map(|story| story.id().clone()).collect()
    }

    /// Iterates stories in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &StoryHandle> {
        self.stories.iter()
    }
}
