//! Routes for the Session bounded context.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use playground_core::build::BuildStatus;
use playground_core::event::DomainEvent;
use playground_core::host::{BaseProps, HostContext, SessionMode, ViewFlags};
use playground_core::story::{StoryDescriptor, StoryId};
use playground_session::application::{command_handlers, query_handlers};
use playground_session::domain::commands;
use playground_session::domain::events::SessionEvent;
use playground_session::domain::render::RenderDecision;
use playground_session::domain::session::{PassOutcome, SessionStateView};
use playground_stories::application::store::StoryStore;
use playground_stories::domain::story_set::StorySet;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct MountSessionRequest {
    /// Project the stories belong to.
    #[serde(default)]
    pub project_name: String,
    /// Editable or view-only.
    #[serde(default)]
    pub mode: SessionMode,
    /// Explicit height, overriding the server's base height.
    #[serde(default)]
    pub height: Option<String>,
    /// Hide the story menu.
    #[serde(default)]
    pub minimal: bool,
    /// Build status at mount time.
    #[serde(default)]
    pub build: BuildStatus,
    /// Stories the set starts with, in order.
    #[serde(default)]
    pub stories: Vec<StoryDescriptor>,
}

/// Request body for POST /{session_id}/select.
#[derive(Debug, Deserialize)]
pub struct SelectStoryRequest {
    /// The story to show.
    pub story_id: StoryId,
}

/// Request body for PUT /{session_id}/build.
#[derive(Debug, Deserialize)]
pub struct ChangeBuildStatusRequest {
    /// The status reported by the build subsystem.
    pub status: BuildStatus,
}

/// One session event in a command response.
#[derive(Debug, Serialize)]
pub struct EventSummary {
    /// The event identifier.
    pub event_id: Uuid,
    /// Dotted event type.
    pub event_type: &'static str,
    /// Event payload.
    pub payload: serde_json::Value,
}

impl From<&SessionEvent> for EventSummary {
    fn from(event: &SessionEvent) -> Self {
        Self {
            event_id: event.metadata.event_id,
            event_type: event.event_type(),
            payload: event.to_payload(),
        }
    }
}

/// Response body returned after a session command is handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The session the command applied to.
    pub session_id: Uuid,
    /// Outcome of the reactive pass, for commands that run one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PassOutcome>,
    /// Session events the command produced.
    pub events: Vec<EventSummary>,
}

impl From<command_handlers::SessionCommandResult> for CommandResponse {
    fn from(result: command_handlers::SessionCommandResult) -> Self {
        Self {
            session_id: result.session_id,
            outcome: result.outcome,
            events: result.events.iter().map(EventSummary::from).collect(),
        }
    }
}

/// Response body for DELETE /{session_id}.
#[derive(Debug, Serialize)]
pub struct TearDownResponse {
    /// The session that was torn down.
    pub session_id: Uuid,
    /// Number of stories unmounted.
    pub unmounted: usize,
}

/// POST /
#[instrument(skip(state, request), fields(mode = ?request.mode, stories = request.stories.len()))]
async fn mount_session(
    State(state): State<AppState>,
    Json(request): Json<MountSessionRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::MountSession {
        correlation_id: Uuid::new_v4(),
        host: HostContext {
            project_name: request.project_name,
            mode: request.mode,
            base_props: BaseProps {
                height: state.config.base_height.clone(),
            },
            height: request.height,
            view_flags: ViewFlags {
                minimal: request.minimal,
            },
        },
        build: request.build,
    };

    info!(correlation_id = %command.correlation_id, "handling mount_session command");

    let set = StorySet::with_event_capacity(Uuid::new_v4(), state.config.event_buffer);
    let store = StoryStore::seeded(set, request.stories, Arc::clone(&state.clock))?;
    let result = command_handlers::handle_mount_session(
        &command,
        store.clone(),
        Arc::new(store),
        Arc::clone(&state.clock),
        &state.sessions,
    )?;

    Ok(Json(result.into()))
}

/// GET /{session_id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionStateView>, ApiError> {
    let view = query_handlers::get_session_state(session_id, &state.sessions)?;
    Ok(Json(view))
}

/// GET /{session_id}/render
#[instrument(skip(state))]
async fn render_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<RenderDecision>, ApiError> {
    let decision = query_handlers::render_session(session_id, &state.sessions)?;
    Ok(Json(decision))
}

/// POST /{session_id}/tick
#[instrument(skip(state))]
async fn run_reactive_pass(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::RunReactivePass {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling run_reactive_pass command");

    let result = command_handlers::handle_run_reactive_pass(&command, &state.sessions)?;
    Ok(Json(result.into()))
}

/// POST /{session_id}/select
#[instrument(skip(state, request), fields(story_id = %request.story_id))]
async fn select_story(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectStoryRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::SelectStory {
        correlation_id: Uuid::new_v4(),
        session_id,
        story_id: request.story_id,
    };

    info!(correlation_id = %command.correlation_id, "handling select_story command");

    let result = command_handlers::handle_select_story(&command, &state.sessions)?;
    Ok(Json(result.into()))
}

/// PUT /{session_id}/build
#[instrument(skip(state, request), fields(status = %request.status))]
async fn change_build_status(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ChangeBuildStatusRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ChangeBuildStatus {
        correlation_id: Uuid::new_v4(),
        session_id,
        status: request.status,
    };

    info!(correlation_id = %command.correlation_id, "handling change_build_status command");

    let result = command_handlers::handle_change_build_status(&command, &state.sessions)?;
    Ok(Json(result.into()))
}

/// DELETE /{session_id}
#[instrument(skip(state))]
async fn tear_down_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TearDownResponse>, ApiError> {
    let command = commands::TearDownSession {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling tear_down_session command");

    let result = command_handlers::handle_tear_down_session(&command, &state.sessions)?;
    Ok(Json(TearDownResponse {
        session_id: result.session_id,
        unmounted: result.unmounted,
    }))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(mount_session))
        .route("/{session_id}", get(get_session).delete(tear_down_session))
        .route("/{session_id}/render", get(render_session))
        .route("/{session_id}/tick", post(run_reactive_pass))
        .route("/{session_id}/select", post(select_story))
        .route("/{session_id}/build", put(change_build_status))
}
