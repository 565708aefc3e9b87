//! Commands for the Story Set context.

use playground_core::command::Command;
use playground_core::story::{StoryDescriptor, StoryId};
use uuid::Uuid;

/// Command to add a story and subscribe it to build updates.
#[derive(Debug, Clone)]
pub struct AddStoryAndSubscribe {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story to add.
    pub descriptor: StoryDescriptor,
}

impl Command for AddStoryAndSubscribe {
    fn command_type(&self) -> &'static str {
        "stories.add_story_and_subscribe"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove a story from the set.
#[derive(Debug, Clone)]
pub struct RemoveStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story to remove.
    pub story_id: StoryId,
}

impl Command for RemoveStory {
    fn command_type(&self) -> &'static str {
        "stories.remove_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
