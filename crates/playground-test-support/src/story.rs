//! Test story — a `Story` that counts how often it was unmounted.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use playground_core::story::{Story, StoryId};

/// A story that records every `unmount` call.
#[derive(Debug)]
pub struct RecordingStory {
    id: StoryId,
    title: String,
    unmounts: AtomicUsize,
}

impl RecordingStory {
    /// Creates a shared recording story titled after its id.
    #[must_use]
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: StoryId::from(id),
            title: format!("Story {id}"),
            unmounts: AtomicUsize::new(0),
        })
    }

    /// Number of times `unmount` has been called.
    pub fn unmount_count(&self) -> usize {
        self.unmounts.load(Ordering::SeqCst)
    }
}

impl Story for RecordingStory {
    fn id(&self) -> &StoryId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_mounted(&self) -> bool {
        self.unmount_count() == 0
    }

    fn unmount(&self) {
        self.unmounts.fetch_add(1, Ordering::SeqCst);
    }
}
