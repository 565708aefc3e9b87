//! Shared handle over one story set.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use playground_core::clock::Clock;
use playground_core::error::DomainError;
use playground_core::story::{StoryCommands, StoryDescriptor};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::application::command_handlers::handle_add_story_and_subscribe;
use crate::domain::commands::AddStoryAndSubscribe;
use crate::domain::events::StorySetEvent;
use crate::domain::story_set::{StorySet, StorySnapshot};

/// Cloneable handle to a story set shared between the story subsystem and
/// the sessions that render it.
#[derive(Clone)]
pub struct StoryStore {
    id: Uuid,
    set: Arc<Mutex<StorySet>>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for StoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoryStore").field("id", &self.id).finish_non_exhaustive()
    }
}

impl StoryStore {
    /// Wraps a story set.
    #[must_use]
    pub fn new(set: StorySet, clock: Arc<dyn Clock>) -> Self {
        Self {
            id: set.id,
            set: Arc::new(Mutex::new(set)),
            clock,
        }
    }

    /// Builds a store whose set already holds `descriptors`, in order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` or `DomainError::DuplicateStory` if a
    /// descriptor is rejected.
    pub fn seeded(
        set: StorySet,
        descriptors: Vec<StoryDescriptor>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let store = Self::new(set, clock);
        let correlation_id = Uuid::new_v4();
        for descriptor in descriptors {
            handle_add_story_and_subscribe(
                &AddStoryAndSubscribe {
                    correlation_id,
                    descriptor,
                },
                &store,
            )?;
        }
        Ok(store)
    }

    /// The story set identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Captures the current membership.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the set lock is poisoned.
    pub fn snapshot(&self) -> Result<StorySnapshot, DomainError> {
        Ok(self.lock()?.snapshot())
    }

    /// Subscribes to membership-changed events.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the set lock is poisoned.
    pub fn subscribe(&self) -> Result<broadcast::Receiver<StorySetEvent>, DomainError> {
        Ok(self.lock()?.subscribe())
    }

    /// Runs `f` with exclusive access to the set and the store's clock.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or `DomainError::Infrastructure` if the
    /// set lock is poisoned.
    pub fn with_set<T>(
        &self,
        f: impl FnOnce(&mut StorySet, &dyn Clock) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut set = self.lock()?;
        f(&mut set, self.clock.as_ref())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StorySet>, DomainError> {
        self.set
            .lock()
            .map_err(|_| DomainError::Infrastructure("story set lock poisoned".into()))
    }
}

impl StoryCommands for StoryStore {
    fn add_story_and_subscribe(
        &self,
        descriptor: StoryDescriptor,
        correlation_id: Uuid,
    ) -> Result<(), DomainError> {
        let command = AddStoryAndSubscribe {
            correlation_id,
            descriptor,
        };
        handle_add_story_and_subscribe(&command, self).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::story::StoryId;
    use playground_test_support::FixedClock;

    fn descriptor(id: &str) -> StoryDescriptor {
        StoryDescriptor {
            id: StoryId::from(id),
            title: format!("Story {id}"),
            script: playground_core::story::StoryScript::default(),
        }
    }

    #[test]
    fn test_seeded_store_keeps_descriptor_order() {
        // Arrange
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::standard());

        // Act
        let store = StoryStore::seeded(
            StorySet::new(Uuid::new_v4()),
            vec![descriptor("a"), descriptor("b")],
            clock,
        )
        .unwrap();

        // Assert
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.ids(), vec![StoryId::from("a"), StoryId::from("b")]);
    }

    #[test]
    fn test_seeded_store_rejects_duplicate_descriptors() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::standard());

        let result = StoryStore::seeded(
            StorySet::new(Uuid::new_v4()),
            vec![descriptor("a"), descriptor("a")],
            clock,
        );

        assert!(matches!(result, Err(DomainError::DuplicateStory(_))));
    }

    #[test]
    fn test_add_story_and_subscribe_applies_immediately() {
        // Arrange
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::standard());
        let store = StoryStore::new(StorySet::new(Uuid::new_v4()), clock);
        let mut receiver = store.subscribe().unwrap();

        // Act
        store
            .add_story_and_subscribe(StoryDescriptor::default_story(), Uuid::new_v4())
            .unwrap();

        // Assert
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.first_id(), Some(&StoryId::from("0")));
        assert_eq!(receiver.try_recv().unwrap().story_id(), &StoryId::from("0"));
    }
}
