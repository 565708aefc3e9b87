//! Session lifecycle: bootstrap on empty, fail fast in view-only mode,
//! unmount everything on teardown.

use playground_core::error::DomainError;
use playground_core::host::SessionMode;
use playground_core::story::{DEFAULT_STORY_ID, StoryCommands, StoryDescriptor};
use playground_stories::domain::events::{StorySetEvent, StorySetEventKind};
use playground_stories::domain::story_set::StorySnapshot;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of one lifecycle observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOutcome {
    /// The story set is non-empty.
    Ready,
    /// The set was empty and the default story was just requested.
    BootstrapRequested,
    /// The set is still empty but a default story request is outstanding.
    BootstrapPending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Bootstrap {
    #[default]
    Idle,
    InProgress,
}

/// Watches story-set emptiness for one session.
#[derive(Debug)]
pub struct LifecycleController {
    mode: SessionMode,
    bootstrap: Bootstrap,
    torn_down: bool,
}

impl LifecycleController {
    /// Creates a controller for a session in `mode`.
    #[must_use]
    pub fn new(mode: SessionMode) -> Self {
        Self {
            mode,
            bootstrap: Bootstrap::Idle,
            torn_down: false,
        }
    }

    /// The session mode this controller enforces.
    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Returns `true` while a default story request has not been observed.
    #[must_use]
    pub fn is_bootstrap_in_progress(&self) -> bool {
        self.bootstrap == Bootstrap::InProgress
    }

    /// Returns `true` once `teardown` has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Reacts to one snapshot of the story set.
    ///
    /// At most one default story is requested per emptiness episode. The
    /// episode ends when a non-empty snapshot is observed or the default
    /// story's `StoryAdded` event arrives.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoStoriesInViewOnlyMode` if the set is empty and
    /// the session is view-only. Errors from the story command port are
    /// propagated and release the bootstrap guard.
    pub fn observe(
        &mut self,
        stories: &StorySnapshot,
        commands: &dyn StoryCommands,
        correlation_id: Uuid,
    ) -> Result<LifecycleOutcome, DomainError> {
        if !stories.is_empty() {
            if self.is_bootstrap_in_progress() {
                debug!("default story observed in story set");
            }
            self.bootstrap = Bootstrap::Idle;
            return Ok(LifecycleOutcome::Ready);
        }

        if !self.mode.is_editable() {
            warn!("story set is empty in view-only mode");
            return Err(DomainError::NoStoriesInViewOnlyMode);
        }

        if self.is_bootstrap_in_progress() {
            debug!("default story requested but not yet visible");
            return Ok(LifecycleOutcome::BootstrapPending);
        }

        self.bootstrap = Bootstrap::InProgress;
        if let Err(err) =
            commands.add_story_and_subscribe(StoryDescriptor::default_story(), correlation_id)
        {
            self.bootstrap = Bootstrap::Idle;
            return Err(err);
        }

        info!(
            story_id = DEFAULT_STORY_ID,
            correlation_id = %correlation_id,
            "requested default story for empty editable session"
        );
        Ok(LifecycleOutcome::BootstrapRequested)
    }

    /// Notes a membership change. Seeing the default story arrive closes the
    /// current emptiness episode even if it is removed again before the next
    /// snapshot.
    pub fn on_membership_event(&mut self, event: &StorySetEvent) {
        if matches!(
            &event.kind,
            StorySetEventKind::StoryAdded(payload) if payload.story_id.as_str() == DEFAULT_STORY_ID
        ) {
            self.bootstrap = Bootstrap::Idle;
        }
    }

    /// Unmounts every story in `stories` once. Later calls do nothing and
    /// return zero. The story set itself is left untouched.
    pub fn teardown(&mut self, stories: &StorySnapshot) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;
        for story in stories.iter() {
            story.unmount();
        }
        stories.len()
    }
}
