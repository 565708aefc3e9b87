//! Build lifecycle signal supplied by the build subsystem.

use serde::{Deserialize, Serialize};

/// State of the compiled artifact backing every story in a session.
///
/// Owned by the external build subsystem; the session only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    /// Nothing has been built yet.
    #[default]
    Unbuilt,
    /// A build is running.
    Building,
    /// The artifact is ready; stories can render.
    Built,
    /// The last build failed.
    Failed,
}

impl BuildStatus {
    /// Returns `true` only when the artifact is ready to render.
    #[must_use]
    pub fn is_built(self) -> bool {
        matches!(self, Self::Built)
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unbuilt => "unbuilt",
            Self::Building => "building",
            Self::Built => "built",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_built_is_ready() {
        assert!(BuildStatus::Built.is_built());
        assert!(!BuildStatus::Unbuilt.is_built());
        assert!(!BuildStatus::Building.is_built());
        assert!(!BuildStatus::Failed.is_built());
    }

    #[test]
    fn test_build_status_serializes_lowercase() {
        let json = serde_json::to_value(BuildStatus::Building).unwrap();
        assert_eq!(json, serde_json::json!("building"));

        let parsed: BuildStatus = serde_json::from_value(serde_json::json!("built")).unwrap();
        assert_eq!(parsed, BuildStatus::Built);
    }
}
