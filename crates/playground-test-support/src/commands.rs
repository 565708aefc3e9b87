//! Test story command ports.

use std::sync::Mutex;

use playground_core::error::DomainError;
use playground_core::story::{StoryCommands, StoryDescriptor};
use uuid::Uuid;

/// A story command port that records every request and applies none of
/// them. Models a story subsystem whose inserts have not become visible yet.
#[derive(Debug, Default)]
pub struct RecordingStoryCommands {
    requested: Mutex<Vec<(StoryDescriptor, Uuid)>>,
}

impl RecordingStoryCommands {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every descriptor requested so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<StoryDescriptor> {
        self.requested
            .lock()
            .unwrap()
            .iter()
            .map(|(descriptor, _)| descriptor.clone())
            .collect()
    }

    /// Returns the correlation IDs passed with each request.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn correlation_ids(&self) -> Vec<Uuid> {
        self.requested
            .lock()
            .unwrap()
            .iter()
            .map(|(_, correlation_id)| *correlation_id)
            .collect()
    }
}

impl StoryCommands for RecordingStoryCommands {
    fn add_story_and_subscribe(
        &self,
        descriptor: StoryDescriptor,
        correlation_id: Uuid,
    ) -> Result<(), DomainError> {
        self.requested
            .lock()
            .unwrap()
            .push((descriptor, correlation_id));
        Ok(())
    }
}

/// A story command port that always fails. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingStoryCommands;

impl StoryCommands for FailingStoryCommands {
    fn add_story_and_subscribe(
        &self,
        _descriptor: StoryDescriptor,
        _correlation_id: Uuid,
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure(
            "story subsystem unavailable".into(),
        ))
    }
}
