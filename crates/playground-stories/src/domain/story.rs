//! Concrete story state held by a story set.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use playground_core::story::{Story, StoryDescriptor, StoryId, StoryScript};
use tracing::debug;

/// A story created from a descriptor by the story subsystem.
#[derive(Debug)]
pub struct StoryState {
    descriptor: StoryDescriptor,
    mounted: AtomicBool,
}

impl StoryState {
    /// Creates a mounted story from its descriptor.
    #[must_use]
    pub fn new(descriptor: StoryDescriptor) -> Arc<Self> {
        Arc::new(Self {
            descriptor,
            mounted: AtomicBool::new(true),
        })
    }

    /// Returns the story's script.
    #[must_use]
    pub fn script(&self) -> &StoryScript {
        &self.descriptor.script
    }
}

impl Story for StoryState {
    fn id(&self) -> &StoryId {
        &self.descriptor.id
    }

    fn title(&self) -> &str {
        &self.descriptor.title
    }

    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    fn unmount(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            debug!(story_id = %self.descriptor.id, "story unmounted");
        }
    }
}
