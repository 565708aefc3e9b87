//! Host/session context supplied by whoever embeds the playground.

use serde::{Deserialize, Serialize};

/// Whether the session may author stories.
///
/// Governs what happens when the story set is empty: an editable session
/// bootstraps a default story, a view-only session fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Stories can be created and edited.
    #[default]
    Editable,
    /// Stories are only displayed.
    ViewOnly,
}

impl SessionMode {
    /// Maps the host's `is_edit_mode` flag onto a mode.
    #[must_use]
    pub fn from_edit_flag(is_edit_mode: bool) -> Self {
        if is_edit_mode {
            Self::Editable
        } else {
            Self::ViewOnly
        }
    }

    /// Returns `true` for [`SessionMode::Editable`].
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Editable)
    }
}

/// Layout defaults provided by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseProps {
    /// CSS height used when the session does not specify its own.
    pub height: String,
}

impl Default for BaseProps {
    fn default() -> Self {
        Self {
            height: "100%".to_owned(),
        }
    }
}

/// Presentation flags for the playground view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFlags {
    /// Hide the story menu and render panels only.
    #[serde(default)]
    pub minimal: bool,
}

/// Everything a session reads from its host. Never mutated by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    /// Project the stories belong to.
    pub project_name: String,
    /// Editable or view-only.
    pub mode: SessionMode,
    /// Host layout defaults.
    pub base_props: BaseProps,
    /// Explicit height for this session, overriding `base_props.height`.
    #[serde(default)]
    pub height: Option<String>,
    /// Presentation flags.
    #[serde(default)]
    pub view_flags: ViewFlags,
}

impl HostContext {
    /// Height the session renders at: the explicit height, else the host
    /// default.
    #[must_use]
    pub fn effective_height(&self) -> &str {
        self.height
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(self.base_props.height.as_str())
    }
}
