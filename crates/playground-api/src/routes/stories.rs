//! Routes for the Story Set bounded context, scoped to one session's set.

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use playground_core::event::DomainEvent;
use playground_core::story::{StoryDescriptor, StoryId};
use playground_session::application::query_handlers::session_story_store;
use playground_stories::application::command_handlers::{self, StoryCommandResult};
use playground_stories::application::query_handlers::{self, StorySetView};
use playground_stories::domain::commands;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body returned after a story command is handled.
#[derive(Debug, Serialize)]
pub struct StoryCommandResponse {
    /// The story set that changed.
    pub story_set_id: Uuid,
    /// The story added or removed.
    pub story_id: StoryId,
    /// ID of the membership event published.
    pub event_id: Uuid,
    /// Dotted event type.
    pub event_type: &'static str,
}

impl From<StoryCommandResult> for StoryCommandResponse {
    fn from(result: StoryCommandResult) -> Self {
        Self {
            story_set_id: result.story_set_id,
            story_id: result.event.story_id().clone(),
            event_id: result.event.metadata.event_id,
            event_type: result.event.event_type(),
        }
    }
}

/// GET /{session_id}/stories
#[instrument(skip(state))]
async fn list_stories(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StorySetView>, ApiError> {
    let store = session_story_store(session_id, &state.sessions)?;
    let view = query_handlers::list_stories(&store)?;
    Ok(Json(view))
}

/// POST /{session_id}/stories
#[instrument(skip(state, request), fields(story_id = %request.id))]
async fn add_story(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<StoryDescriptor>,
) -> Result<Json<StoryCommandResponse>, ApiError> {
    let command = commands::AddStoryAndSubscribe {
        correlation_id: Uuid::new_v4(),
        descriptor: request,
    };

    info!(correlation_id = %command.correlation_id, "handling add_story_and_subscribe command");

    let store = session_story_store(session_id, &state.sessions)?;
    let result = command_handlers::handle_add_story_and_subscribe(&command, &store)?;
    Ok(Json(result.into()))
}

/// DELETE /{session_id}/stories/{story_id}
#[instrument(skip(state))]
async fn remove_story(
    State(state): State<AppState>,
    Path((session_id, story_id)): Path<(Uuid, String)>,
) -> Result<Json<StoryCommandResponse>, ApiError> {
    let command = commands::RemoveStory {
        correlation_id: Uuid::new_v4(),
        story_id: StoryId::from(story_id),
    };

    info!(correlation_id = %command.correlation_id, "handling remove_story command");

    let store = session_story_store(session_id, &state.sessions)?;
    let result = command_handlers::handle_remove_story(&command, &store)?;
    Ok(Json(result.into()))
}

/// Returns the router for story membership under a session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{session_id}/stories",
            get(list_stories).post(add_story),
        )
        .route("/{session_id}/stories/{story_id}", delete(remove_story))
}
