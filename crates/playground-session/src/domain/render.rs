//! Build-gated render decision handed to the view composer.

use playground_core::build::BuildStatus;
use playground_core::host::HostContext;
use playground_core::story::StoryId;
use playground_stories::domain::story_set::StorySnapshot;
use serde::Serialize;

use super::selection::ActiveSelection;

/// What the session can show, ignoring layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderGate {
    /// The build is not ready; selection was not consulted.
    NotBuilt,
    /// Built, but no valid selection yet.
    Loading,
    /// Built and showing the given story.
    Ready(StoryId),
}

/// Gates rendering on build readiness, then on selection validity.
#[must_use]
pub fn gate(build: BuildStatus, selection: &ActiveSelection, stories: &StorySnapshot) -> RenderGate {
    if !build.is_built() {
        return RenderGate::NotBuilt;
    }
    match selection {
        ActiveSelection::Resolved(id) if stories.contains(id) => RenderGate::Ready(id.clone()),
        _ => RenderGate::Loading,
    }
}

/// One tab of the session view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryTab {
    /// The story behind the tab.
    pub story_id: StoryId,
    /// Tab label.
    pub title: String,
    /// Whether this panel is the visible one.
    pub active: bool,
}

/// Full session view: every story keeps a mounted panel, one is visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Project the stories belong to.
    pub project_name: String,
    /// The visible story.
    pub active_story_id: StoryId,
    /// Height each panel renders at.
    pub height: String,
    /// Whether the story menu is shown (hidden in minimal mode).
    pub show_story_menu: bool,
    /// Build status forwarded to every panel.
    pub build: BuildStatus,
    /// Tabs in enumeration order.
    pub tabs: Vec<StoryTab>,
}

/// Render instruction for the view composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderDecision {
    /// Show the "not built yet" placeholder.
    NotBuilt {
        /// Placeholder height.
        height: String,
    },
    /// Show the loading overlay.
    Loading,
    /// Show the tabbed session.
    Session(SessionView),
}

/// Builds the render decision for a session.
///
/// An empty story set always shows the loading overlay, since a default
/// story may still be on its way.
#[must_use]
pub fn compose(
    host: &HostContext,
    build: BuildStatus,
    selection: &ActiveSelection,
    stories: &StorySnapshot,
) -> RenderDecision {
    if stories.is_empty() {
        return RenderDecision::Loading;
    }
    match gate(build, selection, stories) {
        RenderGate::NotBuilt => RenderDecision::NotBuilt {
            height: host.effective_height().to_owned(),
        },
        RenderGate::Loading => RenderDecision::Loading,
        RenderGate::Ready(active) => {
            let tabs = stories
                .iter()
                .map(|story| StoryTab {
                    story_id: story.id().clone(),
                    title: story.title().to_owned(),
                    active: story.id() == &active,
                })
                .collect();
            RenderDecision::Session(SessionView {
                project_name: host.project_name.clone(),
                active_story_id: active,
                height: host.effective_height().to_owned(),
                show_story_menu: !host.view_flags.minimal,
                build,
                tabs,
            })
        }
    }
}
