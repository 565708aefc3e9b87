//! Domain layer for the Session context.

pub mod commands;
pub mod events;
pub mod lifecycle;
pub mod render;
pub mod selection;
pub mod session;
