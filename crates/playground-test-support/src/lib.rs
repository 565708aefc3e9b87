//! Shared test doubles for the story playground.

mod clock;
mod commands;
mod story;

pub use clock::FixedClock;
pub use commands::{FailingStoryCommands, RecordingStoryCommands};
pub use story::RecordingStory;
