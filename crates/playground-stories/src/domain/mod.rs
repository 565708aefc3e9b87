//! Domain layer for the Story Set context.

pub mod commands;
pub mod events;
pub mod story;
pub mod story_set;
