//! Commands for the Session context.

use playground_core::build::BuildStatus;
use playground_core::command::Command;
use playground_core::host::HostContext;
use playground_core::story::StoryId;
use uuid::Uuid;

/// Command to mount a session over a story set.
#[derive(Debug, Clone)]
pub struct MountSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Host context the session reads.
    pub host: HostContext,
    /// Build status at mount time.
    pub build: BuildStatus,
}

impl Command for MountSession {
    fn command_type(&self) -> &'static str {
        "session.mount"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to run one reactive pass.
#[derive(Debug, Clone)]
pub struct RunReactivePass {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
}

impl Command for RunReactivePass {
    fn command_type(&self) -> &'static str {
        "session.run_reactive_pass"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command carrying an explicit user selection.
#[derive(Debug, Clone)]
pub struct SelectStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
    /// The story to show.
    pub story_id: StoryId,
}

impl Command for SelectStory {
    fn command_type(&self) -> &'static str {
        "session.select_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command forwarding a build status from the build subsystem.
#[derive(Debug, Clone)]
pub struct ChangeBuildStatus {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
    /// The new status.
    pub status: BuildStatus,
}

impl Command for ChangeBuildStatus {
    fn command_type(&self) -> &'static str {
        "session.change_build_status"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to tear a session down when its view unmounts.
#[derive(Debug, Clone)]
pub struct TearDownSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
}

impl Command for TearDownSession {
    fn command_type(&self) -> &'static str {
        "session.tear_down"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
