//! Command handlers for the Session context.
//!
//! Each handler looks the session up in the registry, applies the command,
//! and drains the session events the command produced.

use std::sync::Arc;

use playground_core::clock::Clock;
use playground_core::command::Command;
use playground_core::error::DomainError;
use playground_core::story::StoryCommands;
use playground_stories::application::store::StoryStore;
use tracing::info;
use uuid::Uuid;

use crate::application::registry::SessionRegistry;
use crate::domain::commands::{
    ChangeBuildStatus, MountSession, RunReactivePass, SelectStory, TearDownSession,
};
use crate::domain::events::SessionEvent;
use crate::domain::session::{PassOutcome, PlaygroundSession};

/// Result of a handled session command.
#[derive(Debug)]
pub struct SessionCommandResult {
    /// The session affected or created by the command.
    pub session_id: Uuid,
    /// Outcome of the reactive pass, for commands that run one.
    pub outcome: Option<PassOutcome>,
    /// Session events produced by the command.
    pub events: Vec<SessionEvent>,
}

/// Result of tearing a session down.
#[derive(Debug)]
pub struct TearDownResult {
    /// The session that was torn down.
    pub session_id: Uuid,
    /// Number of stories unmounted.
    pub unmounted: usize,
}

/// Handles the `MountSession` command: mounts a session over `store`, runs
/// the first reactive pass, and registers the session.
///
/// The session is only registered if the first pass succeeds, so a
/// view-only session over an empty story set is never reachable.
///
/// # Errors
///
/// Returns `DomainError::NoStoriesInViewOnlyMode` for an empty view-only
/// session, or any error from subscribing, the story command port, or the
/// registry.
pub fn handle_mount_session(
    command: &MountSession,
    store: StoryStore,
    commands: Arc<dyn StoryCommands>,
    clock: Arc<dyn Clock>,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult, DomainError> {
    let session_id = Uuid::new_v4();
    let mut session = PlaygroundSession::mount(
        session_id,
        command.host.clone(),
        command.build,
        store,
        commands,
        clock,
    )?;
    let outcome = session.tick(command.correlation_id())?;
    let events = session.take_uncommitted_events();
    registry.insert(session)?;

    info!(
        session_id = %session_id,
        ?outcome,
        correlation_id = %command.correlation_id(),
        "mounted session"
    );
    Ok(SessionCommandResult {
        session_id,
        outcome: Some(outcome),
        events,
    })
}

/// Handles the `RunReactivePass` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is not registered,
/// or the error the pass produced.
pub fn handle_run_reactive_pass(
    command: &RunReactivePass,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult, DomainError> {
    registry.with_session(command.session_id, |session| {
        let outcome = session.tick(command.correlation_id())?;
        Ok(SessionCommandResult {
            session_id: session.id,
            outcome: Some(outcome),
            events: session.take_uncommitted_events(),
        })
    })
}

/// Handles the `SelectStory` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is not registered,
/// `DomainError::StoryNotFound` if the story is not in its set, or the
/// session's halted or torn-down error.
pub fn handle_select_story(
    command: &SelectStory,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult, DomainError> {
    registry.with_session(command.session_id, |session| {
        session.select(&command.story_id, command.correlation_id())?;
        Ok(SessionCommandResult {
            session_id: session.id,
            outcome: None,
            events: session.take_uncommitted_events(),
        })
    })
}

/// Handles the `ChangeBuildStatus` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is not registered.
pub fn handle_change_build_status(
    command: &ChangeBuildStatus,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult, DomainError> {
    registry.with_session(command.session_id, |session| {
        session.set_build_status(command.status, command.correlation_id())?;
        Ok(SessionCommandResult {
            session_id: session.id,
            outcome: None,
            events: session.take_uncommitted_events(),
        })
    })
}

/// Handles the `TearDownSession` command: unmounts every story still in the
/// session's set, then removes the session from the registry.
///
/// A failed teardown leaves the session registered so it can be retried.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is not registered,
/// or `DomainError::Infrastructure` if its story set cannot be read.
pub fn handle_tear_down_session(
    command: &TearDownSession,
    registry: &SessionRegistry,
) -> Result<TearDownResult, DomainError> {
    let unmounted = registry.with_session(command.session_id, |session| {
        session.teardown(command.correlation_id())
    })?;
    registry.remove(command.session_id)?;

    info!(
        session_id = %command.session_id,
        unmounted,
        correlation_id = %command.correlation_id(),
        "tore down session"
    );
    Ok(TearDownResult {
        session_id: command.session_id,
        unmounted,
    })
}
