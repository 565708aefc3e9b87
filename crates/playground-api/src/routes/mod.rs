//! Route modules organized by bounded context.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod session;
pub mod stories;

/// Returns every route the server exposes, before middleware layers.
pub fn api_router() -> Router<AppState> {
    Router::new().merge(health::router()).nest(
        "/api/v1/sessions",
        session::router().merge(stories::router()),
    )
}
