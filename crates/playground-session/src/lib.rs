//! Story playground — Session bounded context.
//!
//! Responsible for the per-session state machine: which story is active,
//! bootstrapping a default story when an editable session starts empty,
//! failing view-only sessions that have nothing to show, gating rendering on
//! build readiness, and unmounting stories on teardown.

pub mod application;
pub mod domain;
