//! Query handlers for the Story Set context.

use playground_core::error::DomainError;
use playground_core::story::StoryId;
use serde::Serialize;
use uuid::Uuid;

use crate::application::store::StoryStore;

/// One row of a story listing.
#[derive(Debug, Serialize)]
pub struct StorySummary {
    /// The story identifier.
    pub story_id: StoryId,
    /// The story title.
    pub title: String,
    /// Whether the story is still mounted.
    pub mounted: bool,
}

/// Read-only view of a story set, in enumeration order.
#[derive(Debug, Serialize)]
pub struct StorySetView {
    /// The story set identifier.
    pub story_set_id: Uuid,
    /// Number of membership changes applied.
    pub version: i64,
    /// Stories in insertion order.
    pub stories: Vec<StorySummary>,
}

/// Lists the stories currently in the set.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the set lock is poisoned.
pub fn list_stories(store: &StoryStore) -> Result<StorySetView, DomainError> {
    let snapshot = store.snapshot()?;
    Ok(StorySetView {
        story_set_id: store.id(),
        version: snapshot.version(),
        stories: snapshot
            .iter()
            .map(|story| StorySummary {
                story_id: story.id().clone(),
                title: story.title().to_owned(),
                mounted: story.is_mounted(),
            })
            .collect(),
    })
}
