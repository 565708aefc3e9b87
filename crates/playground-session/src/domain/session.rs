//! The playground session: one mounted view over a story set.
//!
//! A session is driven by explicit reactive passes. Each pass drains the
//! story set's membership events, takes one snapshot, lets the lifecycle
//! controller react to emptiness, then lets the selection tracker resolve
//! against that same snapshot. A default story requested during a pass is
//! therefore only observed on the following pass.

use std::fmt;
use std::sync::Arc;

use playground_core::build::BuildStatus;
use playground_core::clock::Clock;
use playground_core::error::DomainError;
use playground_core::event::EventMetadata;
use playground_core::host::{HostContext, SessionMode};
use playground_core::story::{DEFAULT_STORY_ID, StoryCommands, StoryId};
use playground_stories::application::store::StoryStore;
use playground_stories::domain::events::StorySetEvent;
use serde::Serialize;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::events::{
    ActiveStoryResolved, BuildStatusChanged, DefaultStoryRequested, SessionEvent,
    SessionEventKind, SessionTornDown,
};
use super::lifecycle::{LifecycleController, LifecycleOutcome};
use super::render::{RenderDecision, compose};
use super::selection::{ActiveSelection, ActiveSelectionTracker, SelectionChange};

/// Where a session is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Mounted and reacting to changes.
    Mounted,
    /// Halted by a fatal condition; rendering returns that error.
    Failed,
    /// Torn down; passes are discarded.
    TornDown,
}

/// Result of one reactive pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassOutcome {
    /// The story set was non-empty and the selection is resolved.
    Settled,
    /// The set was empty and a default story was requested.
    BootstrapRequested,
    /// The set is still empty; a default story request is outstanding.
    BootstrapPending,
    /// The session had torn down; nothing was done.
    Discarded,
}

impl From<LifecycleOutcome> for PassOutcome {
    fn from(outcome: LifecycleOutcome) -> Self {
        match outcome {
            LifecycleOutcome::Ready => Self::Settled,
            LifecycleOutcome::BootstrapRequested => Self::BootstrapRequested,
            LifecycleOutcome::BootstrapPending => Self::BootstrapPending,
        }
    }
}

/// Serializable summary of a session for queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStateView {
    /// The session identifier.
    pub session_id: Uuid,
    /// The story set the session renders.
    pub story_set_id: Uuid,
    /// Editable or view-only.
    pub mode: SessionMode,
    /// Last build status reported.
    pub build: BuildStatus,
    /// Current phase.
    pub phase: SessionPhase,
    /// Current selection.
    pub active: ActiveSelection,
    /// Whether a default story request is outstanding.
    pub bootstrap_in_progress: bool,
    /// Story ids in enumeration order.
    pub story_ids: Vec<StoryId>,
    /// Number of session events recorded.
    pub version: i64,
}

/// One mounted playground view.
pub struct PlaygroundSession {
    /// Session identifier.
    pub id: Uuid,
    host: HostContext,
    build: BuildStatus,
    store: StoryStore,
    commands: Arc<dyn StoryCommands>,
    clock: Arc<dyn Clock>,
    membership: Option<broadcast::Receiver<StorySetEvent>>,
    tracker: ActiveSelectionTracker,
    lifecycle: LifecycleController,
    phase: SessionPhase,
    failure: Option<DomainError>,
    version: i64,
    events: Vec<SessionEvent>,
}

impl fmt::Debug for PlaygroundSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaygroundSession")
            .field("id", &self.id)
            .field("story_set_id", &self.store.id())
            .field("mode", &self.host.mode)
            .field("build", &self.build)
            .field("phase", &self.phase)
            .field("selection", self.tracker.selection())
            .finish_non_exhaustive()
    }
}

impl PlaygroundSession {
    /// Mounts a session over `store`. The selection starts unresolved; run
    /// [`PlaygroundSession::tick`] to resolve it.
    ///
    /// `commands` receives the default story request; it is usually the
    /// same store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the story set cannot be
    /// subscribed to.
    pub fn mount(
        id: Uuid,
        host: HostContext,
        build: BuildStatus,
        store: StoryStore,
        commands: Arc<dyn StoryCommands>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let membership = store.subscribe()?;
        let lifecycle = LifecycleController::new(host.mode);
        debug!(session_id = %id, story_set_id = %store.id(), mode = ?host.mode, "session mounted");
        Ok(Self {
            id,
            host,
            build,
            store,
            commands,
            clock,
            membership: Some(membership),
            tracker: ActiveSelectionTracker::new(),
            lifecycle,
            phase: SessionPhase::Mounted,
            failure: None,
            version: 0,
            events: Vec::new(),
        })
    }

    /// Host context the session was mounted with.
    #[must_use]
    pub fn host(&self) -> &HostContext {
        &self.host
    }

    /// Last build status reported.
    #[must_use]
    pub fn build(&self) -> BuildStatus {
        self.build
    }

    /// The story set this session renders.
    #[must_use]
    pub fn store(&self) -> &StoryStore {
        &self.store
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The fatal error that halted the session, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&DomainError> {
        self.failure.as_ref()
    }

    /// Current selection as of the last pass or explicit selection.
    #[must_use]
    pub fn selection(&self) -> &ActiveSelection {
        self.tracker.selection()
    }

    /// Returns `true` while a default story request is outstanding.
    #[must_use]
    pub fn is_bootstrap_in_progress(&self) -> bool {
        self.lifecycle.is_bootstrap_in_progress()
    }

    /// Number of session events recorded.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Session events recorded since they were last taken.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Hands over the uncommitted events and clears them. `version` keeps
    /// counting, so sequence numbers stay unique across takes.
    pub fn take_uncommitted_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Summarizes the session against the live story set.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the story set cannot be read.
    pub fn state_view(&self) -> Result<SessionStateView, DomainError> {
        let snapshot = self.store.snapshot()?;
        Ok(SessionStateView {
            session_id: self.id,
            story_set_id: self.store.id(),
            mode: self.host.mode,
            build: self.build,
            phase: self.phase,
            active: self.tracker.selection().clone(),
            bootstrap_in_progress: self.lifecycle.is_bootstrap_in_progress(),
            story_ids: snapshot.ids(),
            version: self.version,
        })
    }

    /// Runs one reactive pass.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoStoriesInViewOnlyMode` when a view-only
    /// session finds no stories; the session is then failed and every later
    /// pass returns the same error. Errors from the story set or the story
    /// command port are propagated without failing the session.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn tick(&mut self, correlation_id: Uuid) -> Result<PassOutcome, DomainError> {
        match self.phase {
            SessionPhase::TornDown => {
                debug!("pass discarded after teardown");
                return Ok(PassOutcome::Discarded);
            }
            SessionPhase::Failed => return Err(self.halted()),
            SessionPhase::Mounted => {}
        }

        let membership_changed = self.drain_membership_events();
        let snapshot = self.store.snapshot()?;

        let outcome = match self
            .lifecycle
            .observe(&snapshot, self.commands.as_ref(), correlation_id)
        {
            Ok(outcome) => outcome,
            Err(err) if err.is_fatal() => {
                error!(error = %err, code = err.code(), "session halted");
                self.phase = SessionPhase::Failed;
                self.failure = Some(err.clone());
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        if outcome == LifecycleOutcome::BootstrapRequested {
            self.record(
                SessionEventKind::DefaultStoryRequested(DefaultStoryRequested {
                    session_id: self.id,
                    story_id: StoryId::from(DEFAULT_STORY_ID),
                }),
                correlation_id,
            );
        }

        if membership_changed || !self.tracker.is_valid_for(&snapshot) {
            if let Some(change) = self.tracker.observe(&snapshot) {
                self.record_selection(&change, correlation_id);
            }
        }

        Ok(outcome.into())
    }

    /// Applies an explicit user selection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoryNotFound` if the story is not in the set,
    /// `DomainError::SessionTornDown` after teardown, or the fatal error if
    /// the session has failed.
    #[instrument(skip(self, story_id), fields(session_id = %self.id, story_id = %story_id))]
    pub fn select(&mut self, story_id: &StoryId, correlation_id: Uuid) -> Result<(), DomainError> {
        self.ensure_mounted()?;
        let snapshot = self.store.snapshot()?;
        if let Some(change) = self.tracker.select(story_id, &snapshot)? {
            info!("story selected");
            self.record_selection(&change, correlation_id);
        }
        Ok(())
    }

    /// Records a build status reported by the build subsystem.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionTornDown` after teardown.
    pub fn set_build_status(
        &mut self,
        status: BuildStatus,
        correlation_id: Uuid,
    ) -> Result<(), DomainError> {
        if self.phase == SessionPhase::TornDown {
            return Err(DomainError::SessionTornDown(self.id));
        }
        if status == self.build {
            return Ok(());
        }
        let from = std::mem::replace(&mut self.build, status);
        info!(session_id = %self.id, %from, to = %status, "build status changed");
        self.record(
            SessionEventKind::BuildStatusChanged(BuildStatusChanged {
                session_id: self.id,
                from,
                to: status,
            }),
            correlation_id,
        );
        Ok(())
    }

    /// What the view composer should show right now.
    ///
    /// The selection is re-validated against the live story set, so a story
    /// removed since the last pass renders as loading rather than a stale
    /// panel.
    ///
    /// # Errors
    ///
    /// Returns the fatal error if the session has failed,
    /// `DomainError::SessionTornDown` after teardown, or
    /// `DomainError::Infrastructure` if the story set cannot be read.
    pub fn render(&self) -> Result<RenderDecision, DomainError> {
        self.ensure_mounted()?;
        let snapshot = self.store.snapshot()?;
        Ok(compose(
            &self.host,
            self.build,
            self.tracker.selection(),
            &snapshot,
        ))
    }

    /// Unmounts every story currently in the set and stops reacting to
    /// changes. Returns the number of stories unmounted; zero on repeat.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the story set cannot be read.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn teardown(&mut self, correlation_id: Uuid) -> Result<usize, DomainError> {
        if self.phase == SessionPhase::TornDown {
            return Ok(0);
        }
        let snapshot = self.store.snapshot()?;
        let unmounted = self.lifecycle.teardown(&snapshot);
        self.membership = None;
        self.phase = SessionPhase::TornDown;
        info!(unmounted, "session torn down");
        self.record(
            SessionEventKind::SessionTornDown(SessionTornDown {
                session_id: self.id,
                unmounted,
            }),
            correlation_id,
        );
        Ok(unmounted)
    }

    fn ensure_mounted(&self) -> Result<(), DomainError> {
        match self.phase {
            SessionPhase::Mounted => Ok(()),
            SessionPhase::Failed => Err(self.halted()),
            SessionPhase::TornDown => Err(DomainError::SessionTornDown(self.id)),
        }
    }

    fn halted(&self) -> DomainError {
        self.failure
            .clone()
            .unwrap_or(DomainError::NoStoriesInViewOnlyMode)
    }

    /// Forwards pending membership events to the lifecycle controller.
    /// Returns `true` if membership changed since the last pass.
    fn drain_membership_events(&mut self) -> bool {
        let Some(receiver) = self.membership.as_mut() else {
            return false;
        };
        let mut changed = false;
        loop {
            match receiver.try_recv() {
                Ok(event) => {
                    debug!(story_id = %event.story_id(), "membership changed");
                    self.lifecycle.on_membership_event(&event);
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "membership events lagged");
                    changed = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changed
    }

    fn record_selection(&mut self, change: &SelectionChange, correlation_id: Uuid) {
        let Some(story_id) = change.current.story_id().cloned() else {
            return;
        };
        debug!(story_id = %story_id, reason = ?change.reason, "active story resolved");
        self.record(
            SessionEventKind::ActiveStoryResolved(ActiveStoryResolved {
                session_id: self.id,
                story_id,
                previous_story_id: change.previous.story_id().cloned(),
                reason: change.reason,
            }),
            correlation_id,
        );
    }

    fn record(&mut self, kind: SessionEventKind, correlation_id: Uuid) {
        self.version += 1;
        let metadata = EventMetadata::caused_by_command(
            kind.event_type(),
            self.id,
            self.version,
            correlation_id,
            self.clock.now(),
        );
        self.events.push(SessionEvent { metadata, kind });
    }
}
