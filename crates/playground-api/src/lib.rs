//! Story playground — HTTP API.
//!
//! Exposes playground sessions over JSON: mount a session over a set of
//! stories, drive reactive passes, select stories, report build status, and
//! read the render decision the view composer should show.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
