//! Active story selection.
//!
//! A session shows exactly one story at a time. The selection is either
//! unresolved or names a story present in the story set; whenever the named
//! story disappears the selection falls back to the first story in
//! enumeration order.

use playground_core::error::DomainError;
use playground_core::story::StoryId;
use playground_stories::domain::story_set::StorySnapshot;
use serde::{Deserialize, Serialize};

/// Which story a session is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "story_id", rename_all = "snake_case")]
pub enum ActiveSelection {
    /// No valid story chosen yet.
    #[default]
    Unresolved,
    /// The story being shown.
    Resolved(StoryId),
}

impl ActiveSelection {
    /// The selected story id, if resolved.
    #[must_use]
    pub fn story_id(&self) -> Option<&StoryId> {
        match self {
            Self::Unresolved => None,
            Self::Resolved(id) => Some(id),
        }
    }

    /// Returns `true` if resolved to a story present in `stories`.
    #[must_use]
    pub fn is_valid_for(&self, stories: &StorySnapshot) -> bool {
        self.story_id().is_some_and(|id| stories.contains(id))
    }
}

/// Keeps a valid selection, otherwise falls back to the first story.
///
/// Returns [`ActiveSelection::Unresolved`] only when `stories` is empty.
#[must_use]
pub fn resolve(current: &ActiveSelection, stories: &StorySnapshot) -> ActiveSelection {
    if current.is_valid_for(stories) {
        return current.clone();
    }
    stories
        .first_id()
        .cloned()
        .map_or(ActiveSelection::Unresolved, ActiveSelection::Resolved)
}

/// Why a selection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionReason {
    /// The previous selection was missing or invalid.
    Fallback,
    /// The user picked a story.
    UserSelected,
}

/// A transition of the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// Selection before the transition.
    pub previous: ActiveSelection,
    /// Selection after the transition.
    pub current: ActiveSelection,
    /// What triggered it.
    pub reason: ResolutionReason,
}

/// Owns one session's selection.
#[derive(Debug, Default)]
pub struct ActiveSelectionTracker {
    selection: ActiveSelection,
}

impl ActiveSelectionTracker {
    /// Creates a tracker in the unresolved state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current selection. May be stale until the next `observe`.
    #[must_use]
    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    /// Returns `true` if the current selection names a story in `stories`.
    #[must_use]
    pub fn is_valid_for(&self, stories: &StorySnapshot) -> bool {
        self.selection.is_valid_for(stories)
    }

    /// Re-resolves against `stories`, returning the transition if the
    /// selection changed.
    pub fn observe(&mut self, stories: &StorySnapshot) -> Option<SelectionChange> {
        let next = resolve(&self.selection, stories);
        if next == self.selection {
            return None;
        }
        let previous = std::mem::replace(&mut self.selection, next.clone());
        Some(SelectionChange {
            previous,
            current: next,
            reason: ResolutionReason::Fallback,
        })
    }

    /// Explicitly selects `id`. Overrides the first-story fallback until
    /// `id` leaves the set.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoryNotFound` if `id` is not in `stories`; the
    /// selection is left unchanged.
    pub fn select(
        &mut self,
        id: &StoryId,
        stories: &StorySnapshot,
    ) -> Result<Option<SelectionChange>, DomainError> {
        if !stories.contains(id) {
            return Err(DomainError::StoryNotFound(id.clone()));
        }
        let next = ActiveSelection::Resolved(id.clone());
        if next == self.selection {
            return Ok(None);
        }
        let previous = std::mem::replace(&mut self.selection, next.clone());
        Ok(Some(SelectionChange {
            previous,
            current: next,
            reason: ResolutionReason::UserSelected,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::story::StoryHandle;
    use playground_test_support::RecordingStory;

    fn snapshot(ids: &[&str]) -> StorySnapshot {
        StorySnapshot::new(
            0,
            ids.iter()
                .map(|id| RecordingStory::new(id) as StoryHandle)
                .collect(),
        )
    }

    fn resolved(id: &str) -> ActiveSelection {
        ActiveSelection::Resolved(StoryId::from(id))
    }

    #[test]
    fn test_resolve_unresolved_picks_first_story() {
        let stories = snapshot(&["a", "b", "c"]);

        assert_eq!(resolve(&ActiveSelection::Unresolved, &stories), resolved("a"));
    }

    #[test]
    fn test_resolve_missing_selection_picks_first_story() {
        let stories = snapshot(&["b", "c"]);

        assert_eq!(resolve(&resolved("a"), &stories), resolved("b"));
    }

    #[test]
    fn test_resolve_keeps_valid_selection_even_when_not_first() {
        let stories = snapshot(&["a", "b", "c"]);

        for id in ["a", "b", "c"] {
            assert_eq!(resolve(&resolved(id), &stories), resolved(id));
        }
    }

    #[test]
    fn test_resolve_empty_set_is_unresolved() {
        let stories = snapshot(&[]);

        assert_eq!(resolve(&resolved("a"), &stories), ActiveSelection::Unresolved);
        assert_eq!(
            resolve(&ActiveSelection::Unresolved, &stories),
            ActiveSelection::Unresolved
        );
    }

    #[test]
    fn test_observe_reports_fallback_transition_once() {
        // Arrange
        let mut tracker = ActiveSelectionTracker::new();
        let stories = snapshot(&["a", "b"]);

        // Act
        let first = tracker.observe(&stories);
        let second = tracker.observe(&stories);

        // Assert
        assert_eq!(
            first,
            Some(SelectionChange {
                previous: ActiveSelection::Unresolved,
                current: resolved("a"),
                reason: ResolutionReason::Fallback,
            })
        );
        assert_eq!(second, None);
    }

    #[test]
    fn test_selection_follows_removal_then_sticks_to_user_choice() {
        // Arrange
        let mut tracker = ActiveSelectionTracker::new();
        tracker.observe(&snapshot(&["a", "b"]));
        assert_eq!(tracker.selection(), &resolved("a"));

        // Act: "a" removed
        tracker.observe(&snapshot(&["b"]));

        // Assert
        assert_eq!(tracker.selection(), &resolved("b"));

        // Act: "a" restored ahead of "b", then "b" explicitly selected
        let restored = snapshot(&["a", "b"]);
        tracker.observe(&restored);
        let change = tracker.select(&StoryId::from("b"), &restored).unwrap();

        // Assert
        assert_eq!(change, None);
        assert_eq!(tracker.observe(&restored), None);
        assert_eq!(tracker.selection(), &resolved("b"));
    }

    #[test]
    fn test_select_switches_to_valid_story() {
        // Arrange
        let mut tracker = ActiveSelectionTracker::new();
        let stories = snapshot(&["a", "b"]);
        tracker.observe(&stories);

        // Act
        let change = tracker.select(&StoryId::from("b"), &stories).unwrap();

        // Assert
        assert_eq!(
            change,
            Some(SelectionChange {
                previous: resolved("a"),
                current: resolved("b"),
                reason: ResolutionReason::UserSelected,
            })
        );
        assert!(tracker.is_valid_for(&stories));
    }

    #[test]
    fn test_select_unknown_story_leaves_selection_unchanged() {
        // Arrange
        let mut tracker = ActiveSelectionTracker::new();
        let stories = snapshot(&["a"]);
        tracker.observe(&stories);

        // Act
        let result = tracker.select(&StoryId::from("zzz"), &stories);

        // Assert
        match result {
            Err(DomainError::StoryNotFound(id)) => assert_eq!(id, StoryId::from("zzz")),
            other => panic!("expected StoryNotFound, got {other:?}"),
        }
        assert_eq!(tracker.selection(), &resolved("a"));
    }

    #[test]
    fn test_active_selection_serializes_with_state_tag() {
        let json = serde_json::to_value(resolved("a")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "state": "resolved", "story_id": "a" })
        );

        let json = serde_json::to_value(ActiveSelection::Unresolved).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "unresolved" }));
    }
}
