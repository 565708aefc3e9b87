//! Playground Core — shared domain abstractions.
//!
//! This crate defines the traits and value types that the story set and the
//! playground session both depend on: story handles and descriptors, the
//! story command port, build status, host context, events and errors. It
//! contains no infrastructure code.

pub mod build;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod host;
pub mod story;
