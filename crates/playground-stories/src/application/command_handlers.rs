//! Command handlers for the Story Set context.
//!
//! Each handler validates the command, applies it to the shared story set,
//! and returns the membership event it published.

use playground_core::error::DomainError;
use tracing::info;
use uuid::Uuid;

use crate::application::store::StoryStore;
use crate::domain::commands::{AddStoryAndSubscribe, RemoveStory};
use crate::domain::events::StorySetEvent;
use crate::domain::story::StoryState;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct StoryCommandResult {
    /// The story set affected by the command.
    pub story_set_id: Uuid,
    /// The event published to subscribers.
    pub event: StorySetEvent,
}

/// Handles the `AddStoryAndSubscribe` command: builds a story from the
/// descriptor and appends it to the set.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the descriptor is invalid and
/// `DomainError::DuplicateStory` if the id is taken.
pub fn handle_add_story_and_subscribe(
    command: &AddStoryAndSubscribe,
    store: &StoryStore,
) -> Result<StoryCommandResult, DomainError> {
    command.descriptor.validate()?;

    let story = StoryState::new(command.descriptor.clone());
    let event = store.with_set(|set, clock| set.insert(story, command.correlation_id, clock))?;

    info!(
        story_set_id = %store.id(),
        story_id = %command.descriptor.id,
        correlation_id = %command.correlation_id,
        "story added"
    );

    Ok(StoryCommandResult {
        story_set_id: store.id(),
        event,
    })
}

/// Handles the `RemoveStory` command: takes the story out of the set and
/// unmounts it. Sessions observe the removal on their next pass.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if the story is not in the set.
pub fn handle_remove_story(
    command: &RemoveStory,
    store: &StoryStore,
) -> Result<StoryCommandResult, DomainError> {
    let (story, event) =
        store.with_set(|set, clock| set.remove(&command.story_id, command.correlation_id, clock))?;
    story.unmount();

    info!(
        story_set_id = %store.id(),
        story_id = %command.story_id,
        correlation_id = %command.correlation_id,
        "story removed"
    );

    Ok(StoryCommandResult {
        story_set_id: store.id(),
        event,
    })
}
