//! Application layer for the Story Set context.

pub mod command_handlers;
pub mod query_handlers;
pub mod store;
