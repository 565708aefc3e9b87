//! Story playground — Story Set bounded context.
//!
//! Owns the insertion-ordered set of stories a session renders, publishes
//! membership changes to subscribers, and handles add/remove commands from
//! the story-authoring side.

pub mod application;
pub mod domain;
