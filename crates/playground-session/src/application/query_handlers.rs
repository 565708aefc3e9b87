//! Query handlers for the Session context.
//!
//! Read-only views over registered sessions.

use playground_core::error::DomainError;
use playground_stories::application::store::StoryStore;
use uuid::Uuid;

use crate::application::registry::SessionRegistry;
use crate::domain::render::RenderDecision;
use crate::domain::session::SessionStateView;

/// Retrieves the state view of a session.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is not registered.
pub fn get_session_state(
    session_id: Uuid,
    registry: &SessionRegistry,
) -> Result<SessionStateView, DomainError> {
    registry.with_session(session_id, |session| session.state_view())
}

/// Retrieves what the view composer should show for a session.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is not registered,
/// or the fatal error of a halted session.
pub fn render_session(
    session_id: Uuid,
    registry: &SessionRegistry,
) -> Result<RenderDecision, DomainError> {
    registry.with_session(session_id, |session| session.render())
}

/// Returns the story set a session renders, for story commands and queries.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is not registered.
pub fn session_story_store(
    session_id: Uuid,
    registry: &SessionRegistry,
) -> Result<StoryStore, DomainError> {
    registry.with_session(session_id, |session| Ok(session.store().clone()))
}
